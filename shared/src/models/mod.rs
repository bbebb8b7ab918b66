//! Domain models

pub mod order;
pub mod product;

pub use order::{
    Order, OrderCreateRequest, OrderLine, OrderLineRequest, OrderStatus, OrderStatusUpdate,
    OrderWithLines, PaymentStatus,
};
pub use product::{Product, ProductCreate, ProductUpdate};
