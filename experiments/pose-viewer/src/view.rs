use {
    mirror_image::{Image, ImageError, rgb_to_argb},
    mirror_scene::Framebuffer,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

/// Camera view on the left half of the window, 3D view on the right.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub camera: Rect,
    pub scene: Rect,
}

impl Layout {
    pub fn new(width: usize, height: usize) -> Self {
        let half = width / 2;
        Self {
            camera: Rect {
                x: 0,
                y: 0,
                width: half,
                height,
            },
            scene: Rect {
                x: half,
                y: 0,
                width: width - half,
                height,
            },
        }
    }
}

fn fill_rect(target: &mut Framebuffer, rect: Rect, color: u32) {
    for y in rect.y..rect.y + rect.height {
        for x in rect.x..rect.x + rect.width {
            target.set(x, y, color);
        }
    }
}

/// Draw `frame` scaled to fit `rect`, keeping its aspect ratio and filling
/// the borders with `background`.
pub fn draw_frame(
    target: &mut Framebuffer,
    frame: &Image,
    rect: Rect,
    background: u32,
) -> Result<(), ImageError> {
    fill_rect(target, rect, background);
    if frame.width() == 0 || frame.height() == 0 || rect.width == 0 || rect.height == 0 {
        return Ok(());
    }

    let rgb = frame.to_rgb()?;
    let pixels = rgb_to_argb(&rgb.data);
    let scale = (rect.width as f32 / rgb.width() as f32).min(rect.height as f32 / rgb.height() as f32);
    let width = ((rgb.width() as f32 * scale) as usize).clamp(1, rect.width);
    let height = ((rgb.height() as f32 * scale) as usize).clamp(1, rect.height);
    let left = rect.x + (rect.width - width) / 2;
    let top = rect.y + (rect.height - height) / 2;

    for y in 0..height {
        let src_y = (y * rgb.height() / height).min(rgb.height() - 1);
        let row = &pixels[src_y * rgb.width()..(src_y + 1) * rgb.width()];
        for x in 0..width {
            let src_x = (x * rgb.width() / width).min(rgb.width() - 1);
            target.set(left + x, top + y, row[src_x]);
        }
    }
    Ok(())
}

/// Copy a rendered scene into `rect`, clipped to both buffers.
pub fn draw_scene(target: &mut Framebuffer, scene: &Framebuffer, rect: Rect) {
    let width = rect.width.min(scene.width());
    let height = rect.height.min(scene.height());
    for y in 0..height {
        for x in 0..width {
            if let Some(color) = scene.get(x, y) {
                target.set(rect.x + x, rect.y + y, color);
            }
        }
    }
}
