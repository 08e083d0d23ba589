mod event;

pub use event::{
    CacheCreation, ContentBlock, Event, Message, MessageEvent, ModelUsage, ResultEvent,
    SystemEvent, Usage,
};
