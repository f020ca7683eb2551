mod stock;
mod price_point;
mod user;
mod holding;
mod watchlist;

pub use stock::{Stock, StockDetail, StockSummary};
pub use price_point::PricePoint;
pub use user::{AuthResponse, LeaderboardEntry, LoginRequest, SignupRequest, User, UserProfile};
pub use holding::{Holding, HoldingView};
pub use watchlist::{AddWatchRequest, WatchlistItem};
