use std::io::Cursor;

use super::*;
use crate::assets::source::data_uri_from_bytes;

fn png_1x1(rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(1, 1, rgba.to_vec()).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[tokio::test]
async fn memory_loader_serves_registered_urls_and_logs_policy() {
    let mut loader = MemoryAssetLoader::new();
    loader.insert("https://cdn/p.png", png_1x1([1, 2, 3, 255]));

    let img = load_image(&loader, "https://cdn/p.png", FetchPolicy::Fresh)
        .await
        .unwrap();
    assert_eq!((img.width, img.height), (1, 1));
    assert_eq!(img.rgba8_premul.as_slice(), &[1, 2, 3, 255]);
    assert_eq!(
        loader.fetch_log(),
        vec![("https://cdn/p.png".to_owned(), FetchPolicy::Fresh)]
    );
}

#[tokio::test]
async fn missing_entries_are_asset_errors() {
    let loader = MemoryAssetLoader::new();
    let err = load_image(&loader, "https://cdn/missing.png", FetchPolicy::Cached)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("asset error:"));
}

#[tokio::test]
async fn data_uris_resolve_without_lookup() {
    let loader = MemoryAssetLoader::new();
    let uri = data_uri_from_bytes(&png_1x1([0, 0, 0, 255]), "image/png");
    let img = load_image(&loader, &uri, FetchPolicy::Cached).await.unwrap();
    assert_eq!(img.width, 1);
    assert!(loader.fetch_log().is_empty());
}

#[tokio::test]
async fn http_loader_reads_data_uris_and_files_offline() {
    let loader = HttpAssetLoader::new(LoaderOpts::default()).unwrap();

    let png = png_1x1([10, 20, 30, 255]);
    let uri = data_uri_from_bytes(&png, "image/png");
    let img = load_image(&loader, &uri, FetchPolicy::Cached).await.unwrap();
    assert_eq!(img.rgba8_premul.as_slice(), &[10, 20, 30, 255]);

    let dir = std::env::temp_dir().join("adframe_loader_test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("mask.png");
    std::fs::write(&path, &png).unwrap();
    let img = load_image(&loader, &path.to_string_lossy(), FetchPolicy::Fresh)
        .await
        .unwrap();
    assert_eq!(img.width, 1);

    let missing = dir.join("nope.png");
    let err = load_image(&loader, &missing.to_string_lossy(), FetchPolicy::Cached)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("asset error:"));
}
