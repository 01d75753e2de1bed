use tracing::info;

use crate::storage::SeaOrmStorage;

/// 服务器停止后释放资源
///
/// SIGINT / SIGTERM 由 actix 处理，这里只在 server future 结束后关闭连接池。
pub async fn shutdown(storage: &SeaOrmStorage) {
    info!("Server stopped, closing storage...");
    storage.close().await;
    info!("Shutdown complete");
}
