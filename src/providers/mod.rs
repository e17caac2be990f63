pub mod currencylayer;
pub mod exchangerate_host;
pub mod util;
