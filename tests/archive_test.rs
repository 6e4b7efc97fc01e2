use std::fs::{self, File};
use std::io::Read;
use logo_overlay::models::zip::{ArchiveCompression, ArchiveInput};
use logo_overlay::service::traits::i_service::ArchiveServiceTrait;
use logo_overlay::service::zip::ZipService;

fn read_entries(path: &std::path::Path) -> Vec<(String, Vec<u8>)> {
    let mut archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut entries = Vec::new();
    for i in 0..archive.len() {
        let mut file = archive.by_index(i).unwrap();
        let mut data = Vec::new();
        file.read_to_end(&mut data).unwrap();
        entries.push((file.name().to_string(), data));
    }
    entries
}

#[test]
fn bundles_outputs_by_base_name() {
    let dir = tempfile::tempdir().unwrap();
    let stage = dir.path().join("stage");
    fs::create_dir(&stage).unwrap();
    let a = stage.join("branded_a.mp4");
    let b = stage.join("branded_b.mov");
    fs::write(&a, b"video-a").unwrap();
    fs::write(&b, b"video-b").unwrap();

    let output = dir.path().join("nested/out/branded_videos.zip");
    let result = ZipService::new()
        .create_archive(ArchiveInput {
            files: vec![a, b],
            output: output.clone(),
            compression: ArchiveCompression::Stored,
        })
        .unwrap();

    assert_eq!(result.path, output);
    assert_eq!(result.entries, 2);
    assert_eq!(result.size, fs::metadata(&output).unwrap().len());
    assert_eq!(
        read_entries(&output),
        vec![
            ("branded_a.mp4".to_string(), b"video-a".to_vec()),
            ("branded_b.mov".to_string(), b"video-b".to_vec()),
        ]
    );
}

#[test]
fn deflated_archive_round_trips_content() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("branded_a.mp4");
    fs::write(&a, vec![7u8; 64 * 1024]).unwrap();
    let output = dir.path().join("out.zip");

    ZipService::new()
        .create_archive(ArchiveInput {
            files: vec![a],
            output: output.clone(),
            compression: ArchiveCompression::Deflated,
        })
        .unwrap();

    let entries = read_entries(&output);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].1, vec![7u8; 64 * 1024]);
    assert!(fs::metadata(&output).unwrap().len() < 64 * 1024);
}

#[test]
fn missing_input_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = ZipService::new().create_archive(ArchiveInput {
        files: vec![dir.path().join("gone.mp4")],
        output: dir.path().join("out.zip"),
        compression: ArchiveCompression::Stored,
    });
    assert!(result.is_err());
}
