pub mod record;
pub mod level;
pub mod sink;
pub mod dispatcher;

pub mod udp;
pub mod tcp;
pub mod backend;

pub mod console;
pub mod host;
pub mod init;
pub mod env;
pub mod noop_sink;
