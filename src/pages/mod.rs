pub mod chat;
pub mod conversation;
pub mod files;
pub mod history;
pub mod home;
pub mod search;
pub mod stocks;

pub use chat::ChatPage;
pub use conversation::ConversationPage;
pub use files::FilesPage;
pub use history::HistoryPage;
pub use home::HomePage;
pub use search::SearchPage;
pub use stocks::StocksPage;
