pub mod daemon;
pub mod init;
pub mod keygen;
pub mod profile;
pub mod resolve;
pub mod version;

pub use daemon::Daemon;
pub use init::Init;
pub use keygen::Keygen;
pub use profile::Profile;
pub use resolve::Resolve;
pub use version::Version;
