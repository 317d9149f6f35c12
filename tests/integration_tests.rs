use img_stacker::domain::model::MissingKeyPolicy;
use img_stacker::utils::validation::Validate;
use img_stacker::{CliConfig, LocalStorage, StackEngine, StackError, StackPipeline};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_jpeg(dir: &Path, name: &str, width: u32, height: u32, color: [u8; 3]) {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb(color));
    image::DynamicImage::ImageRgb8(img)
        .save_with_format(dir.join(name), image::ImageFormat::Jpeg)
        .unwrap();
}

fn test_config(input: &TempDir, output: &TempDir) -> CliConfig {
    CliConfig {
        input_path: input.path().to_str().unwrap().to_string(),
        output_path: output.path().to_str().unwrap().to_string(),
        target_width: 60,
        group_size: 5,
        on_missing_key: MissingKeyPolicy::Fail,
        verbose: false,
    }
}

fn run(config: CliConfig) -> img_stacker::Result<img_stacker::domain::model::StackReport> {
    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = StackPipeline::new(storage, config);
    StackEngine::new(pipeline).run()
}

#[test]
fn test_twelve_images_yield_three_batches() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    for i in 1..=12 {
        write_jpeg(input.path(), &format!("img{}.jpg", i), 10, 8, [200, 80, 40]);
    }

    let report = run(test_config(&input, &output)).unwrap();

    // ceil(12 / 5) = 3 outputs, batch sizes 5, 5, 2
    assert_eq!(report.outputs.len(), 3);
    for (i, expected_height) in [(1u32, 240u32), (2, 240), (3, 96)] {
        let path = output.path().join(format!("combined_{}.jpg", i));
        assert!(path.exists(), "missing {}", path.display());

        // 10x8 at width 60 -> 48 per member
        let combined = image::open(&path).unwrap();
        assert_eq!(combined.width(), 60);
        assert_eq!(combined.height(), expected_height);
    }
}

#[test]
fn test_numeric_order_and_draw_order() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    // Written out of numeric order on purpose; img10 must sort after img2
    write_jpeg(input.path(), "img10.jpg", 10, 2, [0, 0, 255]);
    write_jpeg(input.path(), "img2.jpg", 10, 4, [0, 255, 0]);
    write_jpeg(input.path(), "img1.jpg", 10, 10, [255, 0, 0]);

    let report = run(test_config(&input, &output)).unwrap();
    assert_eq!(report.outputs.len(), 1);

    // Heights at width 60: img1 -> 60, img2 -> 24, img10 -> 12
    let combined = image::open(output.path().join("combined_1.jpg"))
        .unwrap()
        .to_rgb8();
    assert_eq!(combined.dimensions(), (60, 96));

    let red = combined.get_pixel(30, 30);
    assert!(red[0] > 180 && red[1] < 80, "rows 0..60 should be red: {:?}", red);

    let green = combined.get_pixel(30, 72);
    assert!(green[1] > 180 && green[0] < 80, "rows 60..84 should be green: {:?}", green);

    let blue = combined.get_pixel(30, 90);
    assert!(blue[2] > 180 && blue[1] < 80, "rows 84..96 should be blue: {:?}", blue);
}

#[test]
fn test_empty_input_dir_succeeds_with_zero_outputs() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    let report = run(test_config(&input, &output)).unwrap();

    assert!(report.outputs.is_empty());
    assert_eq!(fs::read_dir(output.path()).unwrap().count(), 0);
}

#[test]
fn test_missing_input_dir_fails() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    let mut config = test_config(&input, &output);
    config.input_path = input
        .path()
        .join("does_not_exist")
        .to_str()
        .unwrap()
        .to_string();

    let result = run(config);
    assert!(matches!(result, Err(StackError::InputDirError { .. })));
}

#[test]
fn test_filename_without_digits_aborts_by_default() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    write_jpeg(input.path(), "img1.jpg", 10, 8, [200, 80, 40]);
    write_jpeg(input.path(), "cover.jpg", 10, 8, [200, 80, 40]);

    let result = run(test_config(&input, &output));

    assert!(matches!(result, Err(StackError::MissingNumericKey { .. })));
    assert_eq!(fs::read_dir(output.path()).unwrap().count(), 0);
}

#[test]
fn test_skip_policy_drops_unnumbered_files() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    write_jpeg(input.path(), "img1.jpg", 10, 8, [200, 80, 40]);
    write_jpeg(input.path(), "img2.jpg", 10, 8, [200, 80, 40]);
    write_jpeg(input.path(), "cover.jpg", 10, 8, [200, 80, 40]);

    let mut config = test_config(&input, &output);
    config.on_missing_key = MissingKeyPolicy::Skip;

    let report = run(config).unwrap();

    assert_eq!(report.outputs.len(), 1);
    let combined = image::open(output.path().join("combined_1.jpg")).unwrap();
    // Two members survive: 2 * 48
    assert_eq!(combined.height(), 96);
}

#[test]
fn test_corrupt_image_aborts_without_any_output() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    for i in [1, 2, 4, 5, 6] {
        write_jpeg(input.path(), &format!("img{}.jpg", i), 10, 8, [200, 80, 40]);
    }
    fs::write(input.path().join("img3.jpg"), b"definitely not a jpeg").unwrap();

    let result = run(test_config(&input, &output));

    // The 3rd member of the first batch fails, so neither that batch's
    // output nor the second batch's output may exist.
    assert!(result.is_err());
    assert_eq!(fs::read_dir(output.path()).unwrap().count(), 0);
}

#[test]
fn test_invalid_config_is_rejected_before_running() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    let mut config = test_config(&input, &output);
    config.group_size = 0;
    assert!(config.validate().is_err());

    let mut config = test_config(&input, &output);
    config.target_width = 0;
    assert!(config.validate().is_err());
}
