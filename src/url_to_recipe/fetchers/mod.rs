mod relay;

pub use relay::RelayFetcher;
