pub mod banner;
pub mod page_view;
pub mod region_panel;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use banner::{Banner, BannerProps, BANNER_HEIGHT};
pub use page_view::{PageView, PageViewProps};
pub use region_panel::{RegionPanel, RegionPanelProps};
