use std::{
    ops::Deref as _,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    thread::{self, JoinHandle},
};

use image::{GenericImage, GenericImageView, RgbImage};

use crate::{
    camera::Camera,
    renderer::{RenderSettings, worker::Worker},
    scene::Scene,
    screen_block::ScreenBlock,
};

/// Snapshot of how far a render has gotten, in tiles.
#[derive(Copy, Clone, Debug)]
pub struct Progress {
    pub finished: usize,
    pub total: usize,
}

/// Starts rendering the scene on one worker thread per core and returns
/// immediately; the returned handle tracks (and owns) the running render.
/// Workers claim tiles off a shared center-out ordering until none remain.
pub fn render<F1, F2>(
    scene: Scene,
    camera: Camera,
    settings: RenderSettings,
    started_tile_callback: F1,
    finished_tile_callback: F2,
) -> anyhow::Result<RenderProgress>
where
    F1: Fn(ScreenBlock) + Send + Sync + 'static,
    F2: Fn(ScreenBlock, Progress) + Send + Sync + 'static,
{
    let resolution = camera.resolution();
    let image = RgbImage::new(resolution.x, resolution.y);
    let state = Arc::new(RenderState {
        scene,
        camera,
        settings,

        image: Mutex::new(image),

        tile_ordering: ScreenBlock::from_size(resolution).tile_ordering(settings.tile_size),
        next_tile_index: AtomicUsize::new(0),
        finished_tiles: AtomicUsize::new(0),
    });
    let started_tile_callback = Arc::new(started_tile_callback);
    let finished_tile_callback = Arc::new(finished_tile_callback);

    let cores = core_affinity::get_core_ids()
        .expect("We need a CPU list!")
        .into_iter()
        .enumerate();

    let threads = cores
        .map(|(worker_id, core)| {
            let state = Arc::clone(&state);
            let started_tile_callback = Arc::clone(&started_tile_callback);
            let finished_tile_callback = Arc::clone(&finished_tile_callback);

            thread::Builder::new()
                .name(format!("worker{worker_id}"))
                .spawn(move || {
                    core_affinity::set_for_current(core);

                    let mut worker = Worker::new();
                    let tile_size = state.settings.tile_size.get();
                    let mut buffer = RgbImage::new(tile_size, tile_size);

                    while let Some(tile) = state.get_next_tile() {
                        (started_tile_callback)(*tile);

                        worker.render_tile(
                            &state.scene,
                            &state.camera,
                            &state.settings,
                            tile,
                            &mut buffer,
                        );
                        state
                            .image
                            .lock()
                            .expect("Poisoned lock!")
                            .copy_from(
                                buffer.view(0, 0, tile.width(), tile.height()).deref(),
                                tile.min.x,
                                tile.min.y,
                            )
                            .unwrap_or_else(|_| {
                                unreachable!("The tile should always fit into the output")
                            });

                        let progress = Progress {
                            finished: state.finished_tiles.fetch_add(1, Ordering::AcqRel) + 1,
                            total: state.tile_ordering.len(),
                        };
                        (finished_tile_callback)(*tile, progress);
                    }
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RenderProgress {
        render_state: state,
        threads,
    })
}

pub struct RenderProgress {
    render_state: Arc<RenderState>,
    threads: Vec<JoinHandle<()>>,
}

impl RenderProgress {
    pub fn progress(&self) -> Progress {
        Progress {
            finished: self.render_state.finished_tiles.load(Ordering::Acquire),
            total: self.render_state.tile_ordering.len(),
        }
    }

    pub fn progress_percent(&self) -> f32 {
        let Progress { finished, total } = self.progress();
        100.0 * (finished as f32) / (total.max(1) as f32)
    }

    pub fn is_finished(&self) -> bool {
        self.threads.iter().all(|handle| handle.is_finished())
    }

    /// Signal the workers to abort.
    /// Any running workers will still finish their tiles, but no new ones
    /// will be started.
    pub fn abort(&self) {
        self.render_state
            .next_tile_index
            .store(self.render_state.tile_ordering.len(), Ordering::Release);
    }

    /// Wait for the workers to finish.
    pub fn wait(&mut self) {
        self.threads
            .drain(..)
            .for_each(|handle| handle.join().expect("A worker thread panicked"));
    }

    pub fn image(&self) -> &Mutex<RgbImage> {
        &self.render_state.image
    }
}

struct RenderState {
    scene: Scene,
    camera: Camera,
    settings: RenderSettings,

    image: Mutex<RgbImage>,

    tile_ordering: Vec<ScreenBlock>,
    next_tile_index: AtomicUsize,
    finished_tiles: AtomicUsize,
}

impl RenderState {
    fn get_next_tile(&self) -> Option<&ScreenBlock> {
        let id = self.next_tile_index.fetch_add(1, Ordering::AcqRel);
        self.tile_ordering.get(id)
    }
}
