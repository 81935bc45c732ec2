mod skeleton_info;

pub use skeleton_info::SkeletonInfo;
