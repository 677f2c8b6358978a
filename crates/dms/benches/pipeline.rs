use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dms::{DmsConfig, DriverStateMachine, FrameSignal};

fn bench_process(c: &mut Criterion) {
    let mut sm = DriverStateMachine::new(DmsConfig::default()).unwrap();
    let signals: Vec<FrameSignal> = (0..64)
        .map(|i| FrameSignal {
            left_ear: Some(if i % 3 == 0 { 0.1 } else { 0.3 }),
            right_ear: Some(if i % 3 == 0 { 0.1 } else { 0.3 }),
            pitch: (i % 30) as f32 - 15.0,
            yaw: (i % 60) as f32 - 30.0,
            roll: 0.0,
            face_detected: i % 17 != 0,
        })
        .collect();

    c.bench_function("state_machine_process", |b| {
        let mut i = 0;
        b.iter(|| {
            let analysis = sm.process(black_box(&signals[i % signals.len()]));
            i += 1;
            analysis
        })
    });
}

criterion_group!(benches, bench_process);
criterion_main!(benches);
