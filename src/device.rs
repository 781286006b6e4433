//! The rendering device: owns the frame buffer and the worker pool, projects meshes and
//! rasterizes their faces in parallel.

mod buffer;
mod raster;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use parking_lot::Mutex;
use threadpool::ThreadPool;
use tracing::{debug, trace, warn};

pub use buffer::{FrameBuffer, Texel, FAR_DEPTH};
pub use raster::interpolate;

use crate::error::{Error, Result};
use crate::math::{Matrix, Vector3};
use crate::scene::{Camera, Mesh, ProjectedVertex, Vertex};
use crate::settings::RenderSettings;
use crate::shading::{face_color, Color};

/// Jobs per worker for every mesh, so uneven faces still keep all workers busy.
const JOBS_PER_WORKER: usize = 4;

/// Per-mesh matrices, built once per render call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshTransforms {
    pub world: Matrix,
    pub world_view: Matrix,
    pub transform: Matrix, // world * view * projection.
}

impl MeshTransforms {
    pub fn new(mesh: &Mesh, view: Matrix, projection: Matrix) -> Self {
        let world = Matrix::rotation_yaw_pitch_roll(mesh.rotation.y, mesh.rotation.x, mesh.rotation.z)
            * Matrix::translation(mesh.position);
        let world_view = world * view;
        return Self {
            world,
            world_view,
            transform: world_view * projection,
        };
    }
}

/// Takes a model-space vertex to screen space.
/// Screen x and y are in pixels with the origin top-left, z is the view-space depth.
pub fn project(vertex: &Vertex, transforms: &MeshTransforms, width: u32, height: u32) -> Result<ProjectedVertex> {
    let (w, h) = (width as f32, height as f32);
    let point = transforms.transform.transform_coordinate(vertex.coordinates)?;
    let view = transforms.world_view.transform_coordinate(vertex.coordinates)?;
    let world_coordinates = transforms.world.transform_coordinate(vertex.coordinates)?;

    return Ok(ProjectedVertex {
        coordinates: Vector3::new(point.x * w + w / 2.0, -point.y * h + h / 2.0, view.z),
        normal: transforms.world.transform_normal(vertex.normal),
        world_coordinates,
    });
}

/// Text of a caught panic, for the ones raised with a string message.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        return message.to_string();
    }
    if let Some(message) = payload.downcast_ref::<String>() {
        return message.clone();
    }
    return "non-string panic payload".to_string();
}

pub struct Device {
    pub width: u32,
    pub height: u32,
    pub settings: RenderSettings,
    frame: Arc<FrameBuffer>,
    back_buffer: Vec<u8>,   // Presentable rgba8 copy of the frame.
    depth_buffer: Vec<f32>, // Snapshot of the depths, refreshed on request.
    pool: ThreadPool,
}

impl Device {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        return Self::with_settings(width, height, RenderSettings::default());
    }

    pub fn with_settings(width: u32, height: u32, settings: RenderSettings) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }

        let n_pixels = width as usize * height as usize;
        let workers = settings.worker_count();
        debug!("device {}x{} with {} workers", width, height, workers);

        return Ok(Self {
            width,
            height,
            settings,
            frame: Arc::new(FrameBuffer::new(width, height)),
            back_buffer: vec![0; 4 * n_pixels],
            depth_buffer: vec![FAR_DEPTH; n_pixels],
            pool: ThreadPool::with_name("raster".to_string(), workers),
        });
    }

    pub fn frame_buffer(&self) -> &Arc<FrameBuffer> {
        return &self.frame;
    }

    /// Starts a new frame: every pixel gets the colour and the far depth.
    pub fn clear(&mut self, r: u8, g: u8, b: u8, a: u8) {
        self.frame.clear(Color::new(r, g, b, a));
    }

    pub fn project(&self, vertex: &Vertex, transforms: &MeshTransforms) -> Result<ProjectedVertex> {
        return project(vertex, transforms, self.width, self.height);
    }

    fn view_projection(&self, camera: &Camera) -> Result<(Matrix, Matrix)> {
        let view = Matrix::look_at_lh(camera.position, camera.target, Vector3::y())?;
        let projection = Matrix::perspective_fov_rh(
            self.settings.field_of_view,
            self.width as f32 / self.height as f32,
            self.settings.znear,
            self.settings.zfar,
        );
        return Ok((view, projection));
    }

    /// Draws every face of every mesh into the frame buffer.
    /// Faces are split into chunks that run on the worker pool. A face with a vertex that can't be
    /// projected is skipped and the first such error is returned once all meshes are drawn.
    pub fn render(&mut self, camera: &Camera, meshes: &[Mesh]) -> Result<()> {
        let (view, projection) = self.view_projection(camera)?;
        let failure: Arc<Mutex<Option<Error>>> = Arc::new(Mutex::new(None));
        let panicked: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));

        for mesh in meshes {
            let transforms = MeshTransforms::new(mesh, view, projection);
            let face_count = mesh.faces().len();
            let chunk_size = face_count
                .div_ceil(self.pool.max_count() * JOBS_PER_WORKER)
                .max(1);
            trace!("mesh {}: {} faces in chunks of {}", mesh.name, face_count, chunk_size);

            for start in (0..face_count).step_by(chunk_size) {
                let end = (start + chunk_size).min(face_count);
                let frame = Arc::clone(&self.frame);
                let vertices = Arc::clone(mesh.vertices());
                let faces = Arc::clone(mesh.faces());
                let failure = Arc::clone(&failure);
                let light_position = self.settings.light_position;
                let panicked = Arc::clone(&panicked);
                let (width, height) = (self.width, self.height);

                self.pool.execute(move || {
                    let job = panic::catch_unwind(AssertUnwindSafe(|| {
                        for face_index in start..end {
                            let face = faces[face_index];
                            let projected = (|| -> Result<[ProjectedVertex; 3]> {
                                return Ok([
                                    project(&vertices[face.a], &transforms, width, height)?,
                                    project(&vertices[face.b], &transforms, width, height)?,
                                    project(&vertices[face.c], &transforms, width, height)?,
                                ]);
                            })();

                            match projected {
                                Ok([a, b, c]) => {
                                    frame.draw_triangle(a, b, c, face_color(face_index, face_count), light_position);
                                }
                                Err(e) => {
                                    warn!("skipping face {}: {}", face_index, e);
                                    failure.lock().get_or_insert(e);
                                }
                            }
                        }
                    }));
                    if let Err(payload) = job {
                        panicked.lock().get_or_insert(panic_message(&*payload));
                    }
                });
            }
            self.pool.join();
        }

        if let Some(message) = panicked.lock().take() {
            panic!("render job panicked: {}", message);
        }

        return match failure.lock().take() {
            Some(e) => Err(e),
            None => Ok(()),
        };
    }

    /// Finished frame as rgba8, row-major, 4 bytes per pixel.
    pub fn present(&mut self) -> &[u8] {
        self.frame.write_color_bytes(&mut self.back_buffer);
        return &self.back_buffer[..];
    }

    /// View-space depth per pixel, `FAR_DEPTH` where nothing was drawn.
    pub fn depth_buffer(&mut self) -> &[f32] {
        self.frame.write_depth(&mut self.depth_buffer);
        return &self.depth_buffer[..];
    }

    /// Get image, representing depth buffer values as rgba8 gray.
    /// Closer pixels are brighter, pixels nothing was drawn to stay black.
    pub fn depth_image(&mut self) -> Vec<u8> {
        let depths = self.depth_buffer();
        let drawn = depths.iter().filter(|&&z| z != FAR_DEPTH);
        let z_min = drawn.clone().fold(f32::MAX, |min_value, &value| value.min(min_value));
        let z_max = drawn.fold(f32::MIN, |max_value, &value| value.max(max_value));
        let scale = z_max - z_min;

        let mut image = Vec::with_capacity(4 * depths.len());
        for &z in depths {
            let level = if z == FAR_DEPTH {
                0.0
            } else if scale > 0.0 {
                // Leave the furthest surface a dim gray so it stays visible against the background.
                1.0 - 0.75 * (z - z_min) / scale
            } else {
                1.0
            };
            image.extend_from_slice(&Color::from_gray(level).to_bytes());
        }
        return image;
    }
}
