mod errors;
mod keyset;
mod offset;
mod snapshot;
mod util;
