use domain::{DriverError, GpioProvider, PinLevel};
use infrastructure::SysfsGpioProvider;
use std::path::{Path, PathBuf};

// Fake sysfs tree: the kernel would create gpioN on export, so we pre-create it.
async fn fake_sysfs(pins: &[u8]) -> PathBuf {
    let root = std::env::temp_dir().join(format!("conveyor-sysfs-{}", uuid::Uuid::new_v4()));
    for pin in pins {
        tokio::fs::create_dir_all(root.join(format!("gpio{}", pin)))
            .await
            .unwrap();
    }
    root
}

async fn read(root: &Path, rel: &str) -> String {
    tokio::fs::read_to_string(root.join(rel)).await.unwrap()
}

#[tokio::test]
async fn test_sysfs_pulse_sequence() {
    let root = fake_sysfs(&[17, 27]).await;
    let provider = SysfsGpioProvider::new(&root);
    let mut gpio = provider.open().unwrap();

    gpio.configure_as_output(17).await.unwrap();
    gpio.configure_as_output(27).await.unwrap();
    assert_eq!(read(&root, "export").await, "27");
    assert_eq!(read(&root, "gpio17/direction").await, "low");

    gpio.set_level(17, PinLevel::High).await.unwrap();
    assert_eq!(read(&root, "gpio17/value").await, "1");

    gpio.set_level(17, PinLevel::Low).await.unwrap();
    assert_eq!(read(&root, "gpio17/value").await, "0");

    gpio.release_all().await.unwrap();
    assert_eq!(read(&root, "gpio17/direction").await, "in");
    assert_eq!(read(&root, "gpio27/direction").await, "in");
    assert_eq!(read(&root, "unexport").await, "27");

    let _ = tokio::fs::remove_dir_all(&root).await;
}

#[tokio::test]
async fn test_sysfs_write_requires_configuration() {
    let root = fake_sysfs(&[17]).await;
    let provider = SysfsGpioProvider::new(&root);
    let mut gpio = provider.open().unwrap();

    let result = gpio.set_level(17, PinLevel::High).await;
    assert!(matches!(result, Err(DriverError::Write { pin: 17, .. })));

    let _ = tokio::fs::remove_dir_all(&root).await;
}

#[tokio::test]
async fn test_sysfs_missing_root_is_unavailable() {
    let root = std::env::temp_dir().join(format!("conveyor-missing-{}", uuid::Uuid::new_v4()));
    let provider = SysfsGpioProvider::new(&root);

    assert!(matches!(provider.open(), Err(DriverError::Unavailable(_))));
}

#[tokio::test]
async fn test_sysfs_missing_export_fails_configure() {
    let root = fake_sysfs(&[]).await;
    tokio::fs::create_dir_all(&root).await.unwrap();
    let provider = SysfsGpioProvider::new(&root);
    let mut gpio = provider.open().unwrap();

    // export is a plain file here, so the write succeeds but gpio17 never appears
    let result = gpio.configure_as_output(17).await;
    assert!(matches!(result, Err(DriverError::Configure { pin: 17, .. })));

    let _ = tokio::fs::remove_dir_all(&root).await;
}

#[tokio::test]
async fn test_sysfs_release_continues_past_failed_pin() {
    let root = fake_sysfs(&[17, 27]).await;
    let provider = SysfsGpioProvider::new(&root);
    let mut gpio = provider.open().unwrap();

    gpio.configure_as_output(17).await.unwrap();
    gpio.configure_as_output(27).await.unwrap();
    tokio::fs::remove_dir_all(root.join("gpio17")).await.unwrap();

    let result = gpio.release_all().await;
    match result {
        Err(DriverError::Release(reason)) => assert!(reason.contains("pin 17"), "{}", reason),
        other => panic!("expected release error, got {:?}", other),
    }
    assert_eq!(read(&root, "gpio27/direction").await, "in");
    assert_eq!(read(&root, "unexport").await, "27");

    let _ = tokio::fs::remove_dir_all(&root).await;
}

#[tokio::test]
async fn test_sysfs_unexports_when_direction_write_fails() {
    let root = fake_sysfs(&[17, 27]).await;
    let provider = SysfsGpioProvider::new(&root);
    let mut gpio = provider.open().unwrap();

    gpio.configure_as_output(27).await.unwrap();
    tokio::fs::remove_dir_all(root.join("gpio27")).await.unwrap();

    assert!(matches!(gpio.release_all().await, Err(DriverError::Release(_))));
    assert_eq!(read(&root, "unexport").await, "27");

    let _ = tokio::fs::remove_dir_all(&root).await;
}
