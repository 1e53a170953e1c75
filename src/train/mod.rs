pub mod epoch_stats;
pub mod train_config;
pub mod loop_fn;

pub use epoch_stats::EpochStats;
pub use train_config::{DecayCadence, TrainConfig};
pub use loop_fn::{argmax, classify, train_loop};
