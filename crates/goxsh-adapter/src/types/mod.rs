/*
[INPUT]:  API schema definitions
[OUTPUT]: Typed models, enums, and response envelopes
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

pub mod enums;
pub mod models;
pub mod responses;

pub use enums::{OrderKind, OrderStatus, ParseKindError};
pub use models::{Balance, Order, Ticker};
pub use responses::{
    CancelOrderResponse, OrdersResponse, PlaceOrderResponse, TickerResponse, WithdrawResponse,
};
