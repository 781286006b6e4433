use std::path::{Path, PathBuf};
use std::time;

use anyhow::anyhow;
use image::RgbaImage;
use show_image::{create_window, event, ImageInfo, ImageView, WindowOptions};
use tracing::info;

use scanline_renderer::{Camera, Device, Mesh, RenderSettings};

/// Rotation added about x and y on every frame, in radians.
const ROTATION_STEP: f32 = 0.02;

pub struct Params {
    pub width: u32,
    pub height: u32,
    pub print_fps: bool,
    pub settings: RenderSettings,
    pub camera: Camera,
    pub meshes: Vec<Mesh>,
}

/// Helper, defining exit event to be an Escape key press.
fn is_exit_event(window_event: event::WindowEvent) -> bool {
    if let event::WindowEvent::KeyboardInput(event) = window_event {
        if event.input.key_code == Some(event::VirtualKeyCode::Escape) && event.input.state.is_released() {
            return true;
        }
    }

    return false;
}

/// Spins every mesh a little further.
fn advance(meshes: &mut [Mesh]) {
    for mesh in meshes {
        mesh.rotation.x += ROTATION_STEP;
        mesh.rotation.y += ROTATION_STEP;
    }
}

/// One frame of the loop: clear, animate, draw.
fn draw_frame(device: &mut Device, camera: &Camera, meshes: &mut [Mesh]) -> anyhow::Result<()> {
    device.clear(0, 0, 0, 255);
    advance(meshes);
    device.render(camera, meshes)?;
    return Ok(());
}

fn save_rgba(path: &Path, width: u32, height: u32, data: Vec<u8>) -> anyhow::Result<()> {
    let image = RgbaImage::from_raw(width, height, data)
        .ok_or_else(|| anyhow!("frame doesn't match {}x{}", width, height))?;
    image.save(path)?;
    info!("saved {}", path.display());
    return Ok(());
}

/// Renders `frames` frames without a window and writes the last one out.
pub fn render_to_files(
    mut params: Params,
    frames: u32,
    output: Option<PathBuf>,
    depth: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut device = Device::with_settings(params.width, params.height, params.settings)?;

    let time_begin = time::Instant::now();
    for _ in 0..frames.max(1) {
        draw_frame(&mut device, &params.camera, &mut params.meshes)?;
    }
    if params.print_fps {
        let seconds = time_begin.elapsed().as_secs_f32();
        info!("FPS --- {:.1}", frames.max(1) as f32 / seconds);
    }

    if let Some(path) = output {
        save_rgba(&path, params.width, params.height, device.present().to_vec())?;
    }
    if let Some(path) = depth {
        save_rgba(&path, params.width, params.height, device.depth_image())?;
    }
    return Ok(());
}

/// Actually launches the window, showing frames until Escape is released.
pub fn run(mut params: Params) -> anyhow::Result<()> {
    let mut device = Device::with_settings(params.width, params.height, params.settings)?;

    let window_options: WindowOptions = WindowOptions {
        size: Some([params.width, params.height]),
        ..Default::default()
    };
    let window = create_window("output", window_options)?;
    let event_channel = window.event_channel()?;

    let mut exit = false;
    let mut frame_counter_time_begin = time::Instant::now();
    let mut frame_counter: u32 = 0;
    while !exit {
        draw_frame(&mut device, &params.camera, &mut params.meshes)?;

        let image_data = ImageView::new(ImageInfo::rgba8(params.width, params.height), device.present());
        window.set_image("image", image_data)?;

        // Unloading all the events that have piled up, looking for exit event.
        exit = event_channel.try_iter().fold(false, |was_exit_event, window_event| {
            return is_exit_event(window_event) || was_exit_event;
        });

        if params.print_fps {
            // Counting frames to printout stats every second.
            frame_counter += 1;
            if frame_counter_time_begin.elapsed().as_secs_f32() > 1.0 {
                info!("FPS --- {}", frame_counter);
                frame_counter_time_begin = time::Instant::now();
                frame_counter = 0;
            }
        }
    }

    return Ok(());
}
