pub mod base;
pub mod sina;
pub mod stooq;
pub mod tavily;

#[cfg(test)]
pub(crate) mod test_server;
