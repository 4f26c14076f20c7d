use crate::data::counting::CountingChannelRepository;
use crate::error::AppError;
use sea_orm::{ConnectionTrait, EntityName};
use test_utils::{builder::TestBuilder, factory};
