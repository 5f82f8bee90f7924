use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use bonescale_core::{
    MemoryCharacter, MemoryPose, MemoryRenderObject, ScaleApplicator, ScaleProfile, ScaleVector,
};

const PARTIALS: usize = 4;
const BONES: usize = 64;

fn mk_character() -> MemoryCharacter {
    let partials = (0..PARTIALS)
        .map(|p| MemoryPose::with_bones((0..BONES).map(|b| format!("p{p}_bone{b}"))))
        .collect();
    MemoryCharacter::spawned(MemoryRenderObject::new(partials))
}

fn mk_profile() -> ScaleProfile {
    let mut profile = ScaleProfile::new("bench").with_root_scale(ScaleVector::splat(1.05));
    for p in 0..PARTIALS {
        // Every other bone differs from identity.
        for b in (0..BONES).step_by(2) {
            profile.set_bone_scale(format!("p{p}_bone{b}"), ScaleVector::splat(1.25));
        }
    }
    profile
}

fn bench_apply(c: &mut Criterion) {
    let profile = mk_profile();

    c.bench_function("apply_warm_cache", |b| {
        let app = ScaleApplicator::default();
        let mut character = mk_character();
        app.apply(&mut character, &profile);
        b.iter(|| app.apply(black_box(&mut character), black_box(&profile)));
    });

    c.bench_function("apply_after_clear", |b| {
        let app = ScaleApplicator::default();
        // Fresh natural pose per batch so re-initialization finds overrides.
        b.iter_batched(
            mk_character,
            |mut character| {
                app.clear_cache();
                app.apply(black_box(&mut character), black_box(&profile));
                character
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_apply);
criterion_main!(benches);
