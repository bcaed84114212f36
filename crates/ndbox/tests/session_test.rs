use ndbox::StyleConfig;
use ndbox::render::raster::{RasterError, RasterOptions};
use ndbox::render::session::{SessionError, Visualizer};

#[test]
fn download_before_any_render_is_always_rejected() {
    let vis = Visualizer::default();
    for _ in 0..3 {
        assert!(matches!(vis.download(), Err(SessionError::ImageNotReady)));
    }
    assert!(!vis.is_image_ready());
}

#[test]
fn invalid_shape_leaves_previous_image_downloadable() {
    let mut vis = Visualizer::default();
    let first = vis.draw("2 3").unwrap().to_vec();
    let layout_before = vis.layout().cloned().unwrap();
    let canvas_before = vis.canvas().pixmap().unwrap().clone();

    let err = vis.visualize("3 x 5").unwrap_err();
    assert!(matches!(
        err,
        SessionError::Shape(ndbox::Error::InvalidShape { .. })
    ));
    assert!(vis.is_image_ready());
    assert_eq!(vis.download().unwrap(), first.as_slice());
    assert_eq!(vis.layout().unwrap().shape, layout_before.shape);

    let canvas_after = vis.canvas().pixmap().unwrap();
    assert_eq!(
        (canvas_after.width(), canvas_after.height()),
        (canvas_before.width(), canvas_before.height())
    );
    assert_eq!(canvas_after.data(), canvas_before.data());
}

#[test]
fn failed_raster_allocation_keeps_previous_state() {
    let options = RasterOptions {
        scale: 50.0,
        ..RasterOptions::default()
    };
    let mut vis = Visualizer::new(StyleConfig::default(), &options);
    let first = vis.draw("1").unwrap().to_vec();
    let size_before = {
        let pixmap = vis.canvas().pixmap().unwrap();
        (pixmap.width(), pixmap.height())
    };

    // 12 cells fit the layout limits but not once scaled by 50.
    let err = vis.visualize("12").unwrap_err();
    assert!(matches!(err, SessionError::Raster(RasterError::PixmapAlloc)));

    assert!(vis.is_image_ready());
    assert_eq!(vis.download().unwrap(), first.as_slice());
    assert_eq!(vis.layout().unwrap().shape, vec![1]);
    let pixmap = vis.canvas().pixmap().unwrap();
    assert_eq!((pixmap.width(), pixmap.height()), size_before);
}

#[test]
fn oversized_shapes_are_rejected_without_drawing() {
    let mut vis = Visualizer::default();
    vis.draw("2 2").unwrap();

    let deep = vec!["2"; 40].join(" ");
    for text in [deep.as_str(), "100000000000", "60000"] {
        assert!(matches!(
            vis.visualize(text),
            Err(SessionError::Shape(
                ndbox::Error::TooManyElements { .. } | ndbox::Error::CanvasTooLarge { .. }
            ))
        ));
    }
    assert!(vis.is_image_ready());
    assert_eq!(vis.layout().unwrap().shape, vec![2, 2]);
}

#[test]
fn new_draw_blocks_download_until_serialized() {
    let mut vis = Visualizer::default();
    vis.draw("4").unwrap();
    assert!(vis.is_image_ready());

    let layout = vis.visualize("2 2 2").unwrap();
    assert_eq!(layout.shape, vec![2, 2, 2]);
    assert!(!vis.is_image_ready());
    assert!(matches!(vis.download(), Err(SessionError::ImageNotReady)));

    vis.serialize().unwrap();
    assert!(vis.is_image_ready());
    assert!(vis.download().is_ok());
}

#[test]
fn canvas_is_resized_for_every_draw() {
    let mut vis = Visualizer::new(StyleConfig::default(), &RasterOptions::default());
    vis.visualize("4").unwrap();
    let pixmap = vis.canvas().pixmap().unwrap();
    assert_eq!((pixmap.width(), pixmap.height()), (140, 41));

    vis.visualize("1 1").unwrap();
    let pixmap = vis.canvas().pixmap().unwrap();
    assert_eq!((pixmap.width(), pixmap.height()), (57, 57));
}

#[test]
fn degenerate_shapes_are_rejected_without_drawing() {
    let mut vis = Visualizer::default();
    for text in ["", "   ", "3 0 2"] {
        assert!(matches!(
            vis.visualize(text),
            Err(SessionError::Shape(ndbox::Error::DegenerateShape { .. }))
        ));
    }
    assert!(vis.layout().is_none());
    assert!(matches!(vis.serialize(), Err(SessionError::NothingPainted)));
}
