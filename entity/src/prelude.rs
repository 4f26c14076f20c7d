pub use super::counting_channel::Entity as CountingChannel;
