//! Calls

use super::{pop, pop_size, push};
use crate::context::CallContext;
use crate::error::EvmResult;
use crate::frame::Frame;
use crate::operation::ExecutionEnv;
use crate::stack::{bool_to_word, word_to_u64};
use bytes::Bytes;
use cadence_primitives::{Address, Gas};

/// Largest amount a frame holding `available` may forward: all but one 64th
fn max_forwardable(available: Gas) -> Gas {
    available - available / 64
}

/// STATICCALL: gas, address, args offset, args size, return offset, return
/// size. Precompile addresses are served from the registry; anything else
/// goes to the host.
pub fn staticcall(frame: &mut Frame, env: &ExecutionEnv<'_>) -> EvmResult<()> {
    let requested = pop(frame)?;
    let target = Address::from_word(&pop(frame)?);
    let args_offset = pop(frame)?;
    let args_size = pop_size(frame)?;
    let ret_offset = pop(frame)?;
    let ret_size = pop_size(frame)?;

    let args_offset = frame.expand_memory(env.schedule, &args_offset, args_size)?;
    let ret_offset = frame.expand_memory(env.schedule, &ret_offset, ret_size)?;

    let cap = max_forwardable(frame.gas_remaining());
    let forwarded = word_to_u64(&requested).map_or(cap, |r| r.min(cap));
    frame.use_gas(forwarded)?;

    let input = Bytes::from(frame.memory().load_slice(args_offset, args_size));
    let call = CallContext::new(target, frame.call().address, input.clone(), forwarded);

    let precompiled = env.precompiles.call(&target, &input, forwarded, &call);
    let (success, output, gas_used) = match precompiled {
        Some(outcome) => (outcome.is_success(), outcome.output(), outcome.gas_used()),
        None => {
            let outcome = env.host.static_call(target, &call);
            (outcome.success, outcome.output, outcome.gas_used.min(forwarded))
        }
    };

    frame.refund_gas(forwarded - gas_used);
    let copied = &output[..output.len().min(ret_size)];
    frame.memory_mut().store_slice(ret_offset, copied);
    frame.set_return_data(output);
    push(frame, bool_to_word(success))?;
    frame.advance(1);
    Ok(())
}
