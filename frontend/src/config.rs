/// Results requested per search page.
pub const PAGE_LIMIT: usize = 15;
pub const SEARCH_OPTIONS: &[&str] = &["visual"];

/// Delay between hovering a preview tile and issuing its play request.
pub const PREVIEW_DEBOUNCE_MS: u32 = 100;
pub const CONTROLS_HIDE_MS: u32 = 3000;
pub const CLIP_HIGHLIGHT_MS: u32 = 800;
pub const SKIP_SECONDS: f64 = 10.0;
pub const SEARCH_HIGHLIGHT_MS: u32 = 3000;

/// Demo clips looping in the landing page reel.
pub const REEL_VIDEO_URLS: &[&str] = &[
    "https://test-001-fashion.s3.eu-north-1.amazonaws.com/nature-footage-demo/CBE200624_0124.mp4",
    "https://test-001-fashion.s3.eu-north-1.amazonaws.com/nature-footage-demo/CBE200626_0094.mp4",
    "https://test-001-fashion.s3.eu-north-1.amazonaws.com/nature-footage-demo/CBE200627_0216.mp4",
    "https://test-001-fashion.s3.eu-north-1.amazonaws.com/nature-footage-demo/CBE200629_0003.mp4",
    "https://test-001-fashion.s3.eu-north-1.amazonaws.com/nature-footage-demo/CBE220409_0010.mp4",
    "https://test-001-fashion.s3.eu-north-1.amazonaws.com/nature-footage-demo/CFI150512_0001.mp4",
    "https://test-001-fashion.s3.eu-north-1.amazonaws.com/nature-footage-demo/CGRA161205_0002.mp4",
    "https://test-001-fashion.s3.eu-north-1.amazonaws.com/nature-footage-demo/CMO016_0010.mp4",
];
