pub mod merge;
pub mod model;
pub mod normalize;

pub use merge::{apply_updates, deep_merge, expand_dotted_paths, UpdateMap};
pub use model::{
    Gamification, NestedProfileInput, ProfileDetail, ProfileInput, ResolvedProfileFields,
    UserProfileRecord,
};
pub use normalize::{normalize, normalize_with_existing, Clock, FixedClock, SystemClock};
