use std::net::SocketAddr;

use thiserror::Error;

use crate::utils::AppError;

/// 服务器启动/运行错误 (HTTP 处理器使用 [`AppError`])
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("初始化失败: {0}")]
    Init(#[from] AppError),

    #[error("端口绑定失败 {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP 服务异常退出: {0}")]
    Serve(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
