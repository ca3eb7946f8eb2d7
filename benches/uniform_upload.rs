use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use glam::DVec2;

use fractal_viewer::config::{ShaderPaths, ShaderPrecision};
use fractal_viewer::core::shader::ports::program_linker::ProgramLinkerPort;
use fractal_viewer::core::shader::stage::LinkedStages;
use fractal_viewer::{
    CameraModel, FractalKinds, FractalParameters, FrameInputs, RenderLoopController, ShaderError,
};

/// Links nothing; only the host-side staging is measured.
struct NullLinker;

impl ProgramLinkerPort for NullLinker {
    type Handle = ();

    fn link(&self, _stages: &LinkedStages) -> Result<(), ShaderError> {
        Ok(())
    }
}

fn bench_prepare_frame(c: &mut Criterion) {
    let camera = CameraModel::default();
    let params = FractalParameters::default();
    let viewport = DVec2::new(1920.0, 1080.0);

    let mut group = c.benchmark_group("prepare_frame");

    for precision in [ShaderPrecision::Double, ShaderPrecision::Single] {
        let mut controller: RenderLoopController<()> =
            RenderLoopController::new(ShaderPaths::bundled(precision));
        let failures = controller.load_all(&NullLinker);
        assert!(failures.is_empty(), "bundled shaders failed to load: {failures:?}");

        for &kind in FractalKinds::ALL {
            group.bench_function(format!("{kind} ({precision:?})"), |b| {
                b.iter(|| {
                    let inputs = FrameInputs {
                        kind,
                        camera: camera.to_shader_uniforms(viewport),
                        params: &params,
                    };
                    let program = controller.prepare_frame(black_box(&inputs)).unwrap();
                    black_box(program.uniform_bytes());
                })
            });
        }
    }

    group.finish();
}

fn bench_shader_load(c: &mut Criterion) {
    let paths = ShaderPaths::default();

    c.bench_function("load_all_shaders", |b| {
        b.iter(|| {
            let mut controller: RenderLoopController<()> =
                RenderLoopController::new(black_box(paths.clone()));
            controller.load_all(&NullLinker)
        })
    });
}

criterion_group!(benches, bench_prepare_frame, bench_shader_load);
criterion_main!(benches);
