use crate::*;
pub use random::*;

mod random;

pub trait MinefieldGenerator {
    fn generate(self, config: &FieldConfig) -> MineLayout;
}

/// A prepared layout generates itself, whatever the config asks for.
impl MinefieldGenerator for MineLayout {
    fn generate(self, config: &FieldConfig) -> MineLayout {
        if self.size() != config.size() || self.mine_count() != config.mine_count() {
            log::warn!(
                "Prepared layout {:?} with {} mines used for config {:?} with {} mines",
                self.size(),
                self.mine_count(),
                config.size(),
                config.mine_count()
            );
        }
        self
    }
}
