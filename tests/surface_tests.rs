use fastchart::host::MemoryHost;
use fastchart::raster::PlotSurface;

#[test]
fn test_buffer_length_tracks_dimensions() {
    let mut host = MemoryHost::new();
    let mut surface = PlotSurface::new(&mut host, 400, 300);
    assert_eq!(surface.len(), 400 * 300 * 4);
    assert_eq!(surface.stride(), 1600);

    surface.resize(&mut host, 10, 20);
    assert_eq!(surface.len(), 10 * 20 * 4);
}

#[test]
fn test_resize_zero_is_noop() {
    let mut host = MemoryHost::new();
    let mut surface = PlotSurface::new(&mut host, 8, 8);
    surface.write(0, 1, 2, 3, 4);

    surface.resize(&mut host, 0, 0);
    surface.resize(&mut host, 0, 5);
    surface.resize(&mut host, 5, 0);

    // No reallocation happened: dimensions and content survive.
    assert_eq!(surface.len(), 8 * 8 * 4);
    assert_eq!(surface.read(0), [1, 2, 3, 4]);
}

#[test]
fn test_resize_same_dimensions_keeps_buffer() {
    let mut host = MemoryHost::new();
    let mut surface = PlotSurface::new(&mut host, 8, 8);
    surface.write(16, 9, 9, 9, 9);
    assert!(surface.take_needs_clear());

    surface.resize(&mut host, 8, 8);
    assert_eq!(surface.read(16), [9, 9, 9, 9]);
    assert!(!surface.take_needs_clear(), "same-size resize must not latch");
}

#[test]
fn test_needs_clear_latch_is_one_shot() {
    let mut host = MemoryHost::new();
    let mut surface = PlotSurface::new(&mut host, 4, 4);
    assert!(surface.take_needs_clear(), "fresh surface needs one clear");
    assert!(!surface.take_needs_clear());

    surface.resize(&mut host, 6, 6);
    assert!(surface.take_needs_clear());
    assert!(!surface.take_needs_clear());

    surface.mark_needs_clear();
    assert!(surface.take_needs_clear());
}

#[test]
fn test_write_read_and_packed_pixel() {
    let mut host = MemoryHost::new();
    let mut surface = PlotSurface::new(&mut host, 4, 4);
    // Pixel (2, 1) => offset (1*4 + 2) * 4 = 24.
    surface.write(24, 10, 20, 30, 40);
    assert_eq!(surface.read(24), [10, 20, 30, 40]);
    assert_eq!(surface.pixel(2, 1), u32::from_le_bytes([10, 20, 30, 40]));
}

#[test]
fn test_clear_zero_fills() {
    let mut host = MemoryHost::new();
    let mut surface = PlotSurface::new(&mut host, 4, 4);
    surface.write(0, 1, 1, 1, 1);
    surface.write(60, 2, 2, 2, 2);
    surface.clear();
    assert!(surface.bytes().iter().all(|&b| b == 0));
}

#[test]
fn test_commit_presents_buffer_to_target() {
    let mut host = MemoryHost::new();
    let frame = host.frame();
    let mut surface = PlotSurface::new(&mut host, 4, 2);
    surface.write(8, 5, 6, 7, 8);

    surface.commit();
    surface.commit();

    let frame = frame.borrow();
    assert_eq!(frame.presents, 2);
    assert_eq!(frame.pixels.len(), 4 * 2 * 4);
    assert_eq!(&frame.pixels[8..12], &[5, 6, 7, 8]);
}

#[test]
fn test_resize_creates_new_target() {
    let mut host = MemoryHost::new();
    let frame = host.frame();
    let mut surface = PlotSurface::new(&mut host, 4, 4);
    surface.commit();
    assert_eq!(frame.borrow().presents, 1);

    // A resize recreates the target; the frame store resets with it.
    surface.resize(&mut host, 8, 8);
    assert_eq!(frame.borrow().presents, 0);
    assert_eq!(frame.borrow().width, 8);
    surface.commit();
    assert_eq!(frame.borrow().pixels.len(), 8 * 8 * 4);
}
