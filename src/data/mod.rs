pub mod build;
pub mod loader;
pub mod validate;
pub mod weapon;

pub use build::{load_build_file, BuildConfig, BuildEntry, BuildFile, BuildFileError};
pub use loader::{resolve_weapon, resolve_weapon_with_overlay, WeaponLookupError};
pub use validate::{validate_build_file, ValidationReport, ValidationSeverity};
pub use weapon::{builtin_weapons, WeaponRecord, DEFAULT_WEAPONS_PATH};
