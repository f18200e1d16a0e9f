pub mod article;
pub mod keywords;

pub use article::Article;
pub use keywords::KeywordSet;
