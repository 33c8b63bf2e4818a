// Cached regular expressions for the line recognizers

#[macro_use]
mod cache;
