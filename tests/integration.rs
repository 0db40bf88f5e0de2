#[cfg(test)]
mod tests {
    use assert_fs::prelude::*;
    use assert_fs::TempDir;
    use image::GenericImageView;
    use pixelize::{
        BatchConfig, BatchProcessor, InputSource, NoProgress, Outcome, PixelationSpec,
        PixelizeError, Pixelator, ProgressEvent,
    };
    use std::fs;
    use std::path::Path;

    fn write_image(path: &Path, width: u32, height: u32) {
        image::RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x * 5) as u8, (y * 3) as u8, ((x ^ y) & 0xff) as u8])
        })
        .save(path)
        .unwrap();
    }

    fn processor(sizes: &[u32]) -> BatchProcessor {
        BatchProcessor::new(BatchConfig {
            sizes: sizes.to_vec(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_corrupt_file_is_isolated() {
        let temp_dir = TempDir::new().unwrap();
        let a = temp_dir.child("A.png");
        let b = temp_dir.child("B.corrupt");
        let c = temp_dir.child("C.jpg");
        write_image(a.path(), 40, 30);
        b.write_binary(b"\x89PNG but not really").unwrap();
        write_image(c.path(), 30, 40);

        let output = temp_dir.child("out");
        let mut events: Vec<ProgressEvent> = Vec::new();
        let mut sink = |e: &ProgressEvent| events.push(e.clone());

        let summary = processor(&[16, 32])
            .run(
                &InputSource::Files(vec![
                    a.path().to_path_buf(),
                    b.path().to_path_buf(),
                    c.path().to_path_buf(),
                ]),
                output.path(),
                &mut sink,
            )
            .unwrap();

        assert!(output.child("A_16_pixelated.png").path().is_file());
        assert!(output.child("A_32_pixelated.png").path().is_file());
        assert!(output.child("C_16_pixelated.png").path().is_file());
        assert!(output.child("C_32_pixelated.png").path().is_file());
        assert_eq!(fs::read_dir(output.path()).unwrap().count(), 4);

        assert_eq!(summary.artifacts.len(), 4);
        assert_eq!(summary.errors.len(), 1);
        assert_eq!(summary.errors[0].source.as_path(), b.path());
        assert_eq!(summary.errors[0].size, None);
        assert_eq!(summary.files_processed, 3);
        assert_eq!(summary.outcome, Outcome::Completed);
        assert_eq!(events.last().map(|e| e.fraction), Some(1.0));
    }

    #[test]
    fn test_outputs_keep_source_dimensions() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.child("images");
        input.create_dir_all().unwrap();
        write_image(input.child("wide.png").path(), 100, 50);

        let output = temp_dir.child("output");
        processor(&[16])
            .process_directory(input.path(), output.path(), &mut NoProgress)
            .unwrap();

        let result = image::open(output.child("wide_16_pixelated.png").path()).unwrap();
        assert_eq!(result.dimensions(), (100, 50));
    }

    #[test]
    fn test_empty_directory_completes() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.child("images");
        input.create_dir_all().unwrap();
        input.child("readme.txt").write_str("not an image").unwrap();

        let output = temp_dir.child("output");
        let mut fractions = Vec::new();
        let mut sink = |e: &ProgressEvent| fractions.push(e.fraction);

        let summary = processor(&[16, 32, 64])
            .process_directory(input.path(), output.path(), &mut sink)
            .unwrap();

        assert_eq!(summary.files_total, 0);
        assert!(summary.artifacts.is_empty());
        assert!(summary.errors.is_empty());
        assert_eq!(fractions.last(), Some(&1.0));
    }

    #[test]
    fn test_missing_input_creates_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.child("output");

        let err = processor(&[16])
            .process_directory(temp_dir.child("missing").path(), output.path(), &mut NoProgress)
            .unwrap_err();

        assert!(matches!(err, PixelizeError::InputNotFound(_)));
        assert!(!output.path().exists());
    }

    #[test]
    fn test_failed_size_does_not_stop_others() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.child("images");
        input.create_dir_all().unwrap();
        write_image(input.child("A.png").path(), 20, 20);

        // A directory squatting on one output name makes that single write fail.
        let output = temp_dir.child("output");
        output.child("A_32_pixelated.png").create_dir_all().unwrap();

        let summary = processor(&[16, 32, 64])
            .process_directory(input.path(), output.path(), &mut NoProgress)
            .unwrap();

        assert_eq!(summary.artifacts.len(), 2);
        assert_eq!(summary.errors.len(), 1);
        assert_eq!(summary.errors[0].size, Some(32));
        assert!(output.child("A_16_pixelated.png").path().is_file());
        assert!(output.child("A_64_pixelated.png").path().is_file());
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.child("images");
        input.create_dir_all().unwrap();
        write_image(input.child("A.png").path(), 8, 8);
        std::os::unix::fs::symlink(
            input.child("gone.png").path(),
            input.child("dangling.png").path(),
        )
        .unwrap();

        let output = temp_dir.child("output");
        let summary = processor(&[4])
            .process_directory(input.path(), output.path(), &mut NoProgress)
            .unwrap();

        assert_eq!(summary.files_total, 1);
        assert_eq!(summary.artifacts.len(), 1);
        assert!(summary.errors.is_empty());
        assert!(output.child("A_4_pixelated.png").path().is_file());
    }

    #[test]
    fn test_oversized_size_is_isolated() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.child("tiny.png");
        write_image(input.path(), 2, 1);

        let output = temp_dir.child("output");
        let summary = processor(&[u32::MAX, 4])
            .run(
                &InputSource::Files(vec![input.path().to_path_buf()]),
                output.path(),
                &mut NoProgress,
            )
            .unwrap();

        assert_eq!(summary.errors.len(), 1);
        assert_eq!(summary.errors[0].size, Some(u32::MAX));
        assert_eq!(summary.artifacts.len(), 1);
        assert_eq!(summary.artifacts[0].size, 4);
        assert!(output.child("tiny_4_pixelated.png").path().is_file());
    }

    #[test]
    fn test_every_supported_extension_decodes() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.child("images");
        input.create_dir_all().unwrap();

        let extensions = ["png", "jpg", "jpeg", "bmp", "gif", "tiff", "webp"];
        for ext in extensions {
            write_image(input.child(format!("sample_{}.{}", ext, ext)).path(), 24, 12);
        }

        let output = temp_dir.child("output");
        let summary = processor(&[6])
            .process_directory(input.path(), output.path(), &mut NoProgress)
            .unwrap();

        assert!(summary.errors.is_empty(), "{:?}", summary.errors);
        assert_eq!(summary.artifacts.len(), extensions.len());
        for ext in extensions {
            let artifact = output.child(format!("sample_{}_6_pixelated.png", ext));
            let result = image::open(artifact.path()).unwrap();
            assert_eq!(result.dimensions(), (24, 12), "{}", ext);
        }
    }

    #[test]
    fn test_output_is_deterministic() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.child("photo.bmp");
        write_image(input.path(), 33, 21);

        let spec = PixelationSpec::new(8).unwrap();
        let first = temp_dir.child("first.png");
        let second = temp_dir.child("second.png");
        let pixelator = Pixelator::default();
        pixelator.pixelate_file(input.path(), spec, first.path()).unwrap();
        pixelator.pixelate_file(input.path(), spec, second.path()).unwrap();

        assert_eq!(fs::read(first.path()).unwrap(), fs::read(second.path()).unwrap());
    }

    #[test]
    fn test_existing_outputs_are_overwritten() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.child("images");
        input.create_dir_all().unwrap();
        write_image(input.child("A.png").path(), 10, 10);

        let output = temp_dir.child("output");
        output.create_dir_all().unwrap();
        let stale = output.child("A_4_pixelated.png");
        stale.write_str("stale").unwrap();

        processor(&[4])
            .process_directory(input.path(), output.path(), &mut NoProgress)
            .unwrap();

        assert!(image::open(stale.path()).is_ok());
    }

    #[test]
    fn test_invalid_file() {
        let temp_dir = TempDir::new().unwrap();
        let spec = PixelationSpec::new(16).unwrap();
        let result = Pixelator::default().pixelate_file(
            temp_dir.child("nonexistent.jpg").path(),
            spec,
            temp_dir.child("output.png").path(),
        );

        assert!(result.is_err());
    }
}
