use std::fmt::Debug;

use contact_shared_contracts::id::IdService;
use contact_utils::trace_instrument;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default)]
pub struct IdServiceImpl;

impl IdService for IdServiceImpl {
    #[trace_instrument(skip(self))]
    fn generate<I: From<Uuid> + Debug + 'static>(&self) -> I {
        Uuid::now_v7().into()
    }
}
