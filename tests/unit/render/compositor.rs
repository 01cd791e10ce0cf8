use std::io::Cursor;

use super::*;
use crate::assets::loader::MemoryAssetLoader;
use crate::foundation::core::Canvas;
use crate::render::cpu::{CpuSurface, CpuSurfaceOpts};
use crate::render::layers::{Layer, LayerStatus};
use crate::render::record::{DrawCommand, RecordingSurface};
use crate::template::model::ImageMask;

fn png(w: u32, h: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_fn(w, h, |x, y| {
        let shade = ((x + y) * 16) as u8;
        image::Rgba([rgba[0] ^ shade, rgba[1], rgba[2], rgba[3]])
    });
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn loader_for(template: &TemplateSpec) -> MemoryAssetLoader {
    let mut loader = MemoryAssetLoader::new();
    loader
        .insert(template.urls.pattern_url.clone(), png(4, 4, [0, 0, 0, 96]))
        .insert(
            template.urls.mask_url.clone(),
            png(3, 2, [200, 120, 40, 255]),
        );
    loader
}

fn small_template() -> TemplateSpec {
    TemplateSpec {
        canvas: Canvas::new(64, 64).unwrap(),
        caption: None,
        cta: None,
        image_mask: ImageMask {
            x: 8.0,
            y: 8.0,
            width: 48.0,
            height: 32.0,
        },
        ..TemplateSpec::default()
    }
}

#[test]
fn rejects_surface_of_a_different_size() {
    let template = TemplateSpec::default();
    let surface = RecordingSurface::new(Canvas::new(100, 100).unwrap());
    let err = Compositor::new(template, surface, MemoryAssetLoader::new())
        .err()
        .unwrap();
    assert!(err.to_string().contains("template canvas"));
}

#[tokio::test]
async fn render_loads_both_images_then_draws_in_order() {
    let template = TemplateSpec::default();
    let loader = loader_for(&template);
    let edit = EditState::from_template(&template);
    let surface = RecordingSurface::new(template.canvas);
    let mut compositor = Compositor::new(template.clone(), surface, loader).unwrap();

    let report = compositor.render(&edit).await;
    assert!(Layer::ORDER.iter().all(|l| report.drawn(*l)), "{report:?}");

    let cmds = compositor.surface().commands();
    assert_eq!(cmds[0], DrawCommand::Clear);
    assert!(matches!(cmds[1], DrawCommand::FillRect { .. }));
    assert_eq!(
        cmds[2],
        DrawCommand::DrawImage {
            source_size: (4, 4),
            dst: template.canvas.rect(),
        }
    );
    assert_eq!(
        cmds[3],
        DrawCommand::DrawImage {
            source_size: (3, 2),
            dst: template.image_mask.rect(),
        }
    );

    let log = compositor.loader().fetch_log();
    assert_eq!(log.len(), 2);
    assert!(log.contains(&(template.urls.pattern_url.clone(), FetchPolicy::Fresh)));
    assert!(log.contains(&(template.urls.mask_url.clone(), FetchPolicy::Cached)));
}

#[tokio::test]
async fn failed_mask_load_skips_only_that_layer() {
    let template = TemplateSpec::default();
    let loader = loader_for(&template);
    let mut edit = EditState::from_template(&template);
    edit.set_mask_source("https://cdn.example/not-there.png");
    let surface = RecordingSurface::new(template.canvas);
    let mut compositor = Compositor::new(template, surface, loader).unwrap();

    let report = compositor.render(&edit).await;
    assert!(matches!(
        report.status(Layer::MaskImage),
        Some(LayerStatus::Skipped(_))
    ));
    assert!(report.drawn(Layer::Pattern));
    assert!(report.drawn(Layer::Cta));
}

#[tokio::test]
async fn data_uri_mask_needs_no_loader_entry() {
    let template = TemplateSpec::default();
    let loader = loader_for(&template);
    let mut edit = EditState::from_template(&template);
    edit.set_mask_source(crate::assets::source::data_uri_from_bytes(
        &png(5, 5, [1, 2, 3, 255]),
        "image/png",
    ));
    let surface = RecordingSurface::new(template.canvas);
    let mut compositor = Compositor::new(template, surface, loader).unwrap();

    let report = compositor.render(&edit).await;
    assert!(report.drawn(Layer::MaskImage));
    assert!(compositor.surface().commands().contains(&DrawCommand::DrawImage {
        source_size: (5, 5),
        dst: compositor.template().image_mask.rect(),
    }));
    assert_eq!(compositor.loader().fetch_log().len(), 1);
}

#[tokio::test]
async fn identical_inputs_render_identical_pixels() {
    let template = small_template();
    let loader = loader_for(&template);
    let edit = EditState::from_template(&template);
    let surface = CpuSurface::new(template.canvas, CpuSurfaceOpts::default()).unwrap();
    let mut compositor = Compositor::new(template, surface, loader).unwrap();

    let (first_report, first) = compositor.render_frame(&edit).await.unwrap();
    let (second_report, second) = compositor.render_frame(&edit).await.unwrap();
    assert_eq!(first_report, second_report);
    assert_eq!((first.width, first.height), (64, 64));
    assert_eq!(first.data, second.data);

    // Below the mask frame: background under the translucent pattern.
    let below = first.pixel(32, 60).unwrap();
    assert_eq!(below[3], 255);
    assert!(below[2] > 0);
}

#[tokio::test]
async fn changing_the_color_changes_the_background() {
    let template = small_template();
    let loader = loader_for(&template);
    let mut edit = EditState::from_template(&template);
    let surface = CpuSurface::new(template.canvas, CpuSurfaceOpts::default()).unwrap();
    let mut compositor = Compositor::new(template, surface, loader).unwrap();

    let (_, before) = compositor.render_frame(&edit).await.unwrap();
    edit.pick_custom_color("#FF0000".parse().unwrap());
    let (_, after) = compositor.render_frame(&edit).await.unwrap();

    assert_ne!(before.pixel(32, 60), after.pixel(32, 60));
    // The masked photo region is unaffected by the background color.
    assert_eq!(before.pixel(32, 24), after.pixel(32, 24));
}
