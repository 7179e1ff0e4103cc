pub mod http_feed_fetcher;
