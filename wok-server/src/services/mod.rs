//! Services: outbound notification and change broadcast

pub mod notify;
pub mod sync;

pub use notify::NotifyService;
pub use sync::SyncBus;
