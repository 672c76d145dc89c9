use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use cadence_crypto::bn254::{select_backend, Bn254Backend, NativeMode, PortableBn254};
use cadence_evm::opcode::{DUP1, JUMPDEST, JUMPI, PUSH1, PUSH32, STOP, SUB, SWAP1};
use cadence_evm::{CallContext, EngineConfig, Evm, JumpDestinations};
use std::sync::Arc;

/// Mix of JUMPDESTs, PUSH1 and PUSH32 with marker-valued operands
fn synthetic_code(len: usize) -> Vec<u8> {
    let mut code = Vec::with_capacity(len);
    let mut i = 0u32;
    while code.len() < len {
        match i % 3 {
            0 => code.push(JUMPDEST),
            1 => code.extend([PUSH1, JUMPDEST]),
            _ => {
                code.push(PUSH32);
                code.extend([JUMPDEST; 32]);
            }
        }
        i += 1;
    }
    code.truncate(len);
    code
}

fn bench_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("jump_destination_analysis");
    for &len in &[256usize, 4_096, 24_576] {
        let code = synthetic_code(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &code, |b, code| {
            b.iter(|| black_box(JumpDestinations::analyze(code)));
        });
    }
    group.finish();
}

fn mul_input() -> Vec<u8> {
    let mut input = vec![0u8; 96];
    input[31] = 1;
    input[63] = 2;
    input[64..].fill(0xff);
    input
}

fn bench_bn254_mul(c: &mut Criterion) {
    let mut group = c.benchmark_group("alt_bn128_mul");
    let input = mul_input();
    let mut backends: Vec<Arc<dyn Bn254Backend>> = vec![Arc::new(PortableBn254)];
    if let Ok(native) = select_backend(NativeMode::Enabled) {
        backends.push(native);
    }
    for backend in backends {
        let id = BenchmarkId::from_parameter(backend.name());
        group.bench_with_input(id, &input, |b, input| {
            b.iter(|| black_box(backend.g1_mul(input)));
        });
    }
    group.finish();
}

fn bench_countdown(c: &mut Criterion) {
    // counter = 255; loop until zero
    let code = vec![
        PUSH1, 0xff, JUMPDEST, PUSH1, 0x01, SWAP1, SUB, DUP1, PUSH1, 0x02, JUMPI, STOP,
    ];
    let evm = Evm::new(EngineConfig::default()).unwrap();
    let code = evm.load_code(code);
    c.bench_function("countdown_loop", |b| {
        b.iter(|| evm.execute(&code, CallContext::with_gas(1_000_000)));
    });
}

criterion_group!(benches, bench_analysis, bench_bn254_mul, bench_countdown);
criterion_main!(benches);
