// Application identifier baked into the instance lock and channel names.
// Changing it makes new builds stop seeing old running instances.
pub const APP_ID: &str = "QuickPick";

pub const APP_DIR_NAME: &str = "quickpick";

// A directory with this name next to the binary switches the install to
// portable mode: all data and logs stay inside it.
pub const PORTABLE_DIR_NAME: &str = "UserData";

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
