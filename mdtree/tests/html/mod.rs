mod export;
mod raw;
