pub mod d400_admin_stats;

pub use d400_admin_stats::AdminStats;
