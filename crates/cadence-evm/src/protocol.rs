//! Chain context handed to the engine at start-up

use crate::error::EngineError;
use bytes::Bytes;
use cadence_primitives::{Address, BlockHeight, U256};
use dashmap::DashMap;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::info;

/// Canonical chain as seen by the engine
pub trait Blockchain: Send + Sync {
    /// Height of the chain head; 0 when only genesis exists
    fn chain_head_number(&self) -> BlockHeight;
}

/// World-state store
pub trait WorldStateArchive: Send + Sync {
    /// Create or replace an account
    fn put_account(&self, address: Address, account: GenesisAccount) -> Result<(), EngineError>;

    /// Account at `address`
    fn account(&self, address: &Address) -> Option<GenesisAccount>;
}

/// Account allocated at genesis
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenesisAccount {
    /// Balance in wei
    pub balance: U256,
    /// Nonce
    pub nonce: u64,
    /// Contract code; empty for externally owned accounts
    pub code: Bytes,
}

/// Initial allocation written into an empty world state
#[derive(Debug, Clone, Default)]
pub struct GenesisState {
    accounts: BTreeMap<Address, GenesisAccount>,
}

impl GenesisState {
    /// No allocations
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an allocation
    pub fn with_account(mut self, address: Address, account: GenesisAccount) -> Self {
        self.accounts.insert(address, account);
        self
    }

    /// Allocations, ordered by address
    pub fn accounts(&self) -> impl Iterator<Item = (&Address, &GenesisAccount)> + '_ {
        self.accounts.iter()
    }

    /// Write every allocation into `world_state`
    pub fn write_to(&self, world_state: &dyn WorldStateArchive) -> Result<(), EngineError> {
        for (address, account) in &self.accounts {
            world_state.put_account(*address, account.clone())?;
        }
        info!(accounts = self.accounts.len(), "Wrote genesis state");
        Ok(())
    }
}

/// Consensus-specific state, one variant per supported algorithm
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsensusContext {
    /// No extra state
    ProofOfWork,
    /// Proof of authority with periodic checkpoints
    Clique {
        /// Blocks between checkpoints
        epoch_length: u64,
    },
    /// Tendermint-style BFT
    Tbft {
        /// Current validator set
        validators: Vec<Address>,
    },
}

impl ConsensusContext {
    /// Algorithm name
    pub fn name(&self) -> &'static str {
        match self {
            ConsensusContext::ProofOfWork => "pow",
            ConsensusContext::Clique { .. } => "clique",
            ConsensusContext::Tbft { .. } => "tbft",
        }
    }

    /// Clique epoch length
    pub fn as_clique(&self) -> Option<u64> {
        match self {
            ConsensusContext::Clique { epoch_length } => Some(*epoch_length),
            _ => None,
        }
    }

    /// TBFT validator set
    pub fn as_tbft(&self) -> Option<&[Address]> {
        match self {
            ConsensusContext::Tbft { validators } => Some(validators),
            _ => None,
        }
    }
}

/// Blockchain, world state and consensus state shared by the node's
/// components
#[derive(Clone)]
pub struct ProtocolContext {
    blockchain: Arc<dyn Blockchain>,
    world_state: Arc<dyn WorldStateArchive>,
    consensus: ConsensusContext,
}

impl ProtocolContext {
    /// Assemble from existing parts
    pub fn new(
        blockchain: Arc<dyn Blockchain>,
        world_state: Arc<dyn WorldStateArchive>,
        consensus: ConsensusContext,
    ) -> Self {
        Self {
            blockchain,
            world_state,
            consensus,
        }
    }

    /// Start-up sequence: write `genesis` when the chain has no block past
    /// genesis, then build the consensus state from the chain and state.
    pub fn init<F>(
        blockchain: Arc<dyn Blockchain>,
        world_state: Arc<dyn WorldStateArchive>,
        genesis: &GenesisState,
        consensus: F,
    ) -> Result<Self, EngineError>
    where
        F: FnOnce(&dyn Blockchain, &dyn WorldStateArchive) -> ConsensusContext,
    {
        if blockchain.chain_head_number() < 1 {
            genesis.write_to(world_state.as_ref())?;
        }
        let consensus = consensus(blockchain.as_ref(), world_state.as_ref());
        info!(
            head = blockchain.chain_head_number(),
            consensus = consensus.name(),
            "Initialized protocol context"
        );
        Ok(Self::new(blockchain, world_state, consensus))
    }

    /// Canonical chain
    pub fn blockchain(&self) -> &Arc<dyn Blockchain> {
        &self.blockchain
    }

    /// World state
    pub fn world_state(&self) -> &Arc<dyn WorldStateArchive> {
        &self.world_state
    }

    /// Consensus state
    pub fn consensus(&self) -> &ConsensusContext {
        &self.consensus
    }
}

impl std::fmt::Debug for ProtocolContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProtocolContext")
            .field("head", &self.blockchain.chain_head_number())
            .field("consensus", &self.consensus)
            .finish()
    }
}

/// Chain that only tracks its head height
#[derive(Debug, Default)]
pub struct MemoryBlockchain {
    head: AtomicU64,
}

impl MemoryBlockchain {
    /// Chain whose head is at `head`
    pub fn with_head(head: BlockHeight) -> Self {
        Self {
            head: AtomicU64::new(head),
        }
    }

    /// Move the head
    pub fn set_head(&self, head: BlockHeight) {
        self.head.store(head, Ordering::SeqCst);
    }
}

impl Blockchain for MemoryBlockchain {
    fn chain_head_number(&self) -> BlockHeight {
        self.head.load(Ordering::SeqCst)
    }
}

/// World state held in a concurrent map
#[derive(Debug, Default)]
pub struct MemoryWorldState {
    accounts: DashMap<Address, GenesisAccount>,
}

impl MemoryWorldState {
    /// Empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of accounts
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether no account exists
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl WorldStateArchive for MemoryWorldState {
    fn put_account(&self, address: Address, account: GenesisAccount) -> Result<(), EngineError> {
        self.accounts.insert(address, account);
        Ok(())
    }

    fn account(&self, address: &Address) -> Option<GenesisAccount> {
        self.accounts.get(address).map(|e| e.value().clone())
    }
}
