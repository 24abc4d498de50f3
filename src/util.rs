#[inline(always)]
#[cold]
pub(crate) fn cold_path() {}
