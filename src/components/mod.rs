// ABOUTME: UI components for the TUI interface: the host page, the demo wizard modal, and the layout

pub mod demo_wizard;
pub mod landing;
pub mod layout;

pub use demo_wizard::DemoWizardComponent;
pub use landing::LandingComponent;
pub use layout::LayoutComponent;
