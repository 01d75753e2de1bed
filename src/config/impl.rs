use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;

use super::StaticConfig;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

static CONFIG: OnceLock<ArcSwap<StaticConfig>> = OnceLock::new();

fn slot(path: &str) -> &'static ArcSwap<StaticConfig> {
    CONFIG.get_or_init(|| ArcSwap::from_pointee(StaticConfig::load_or_default(path)))
}

/// 当前生效的配置快照
///
/// 若启动流程尚未调用 [`init_config_from`]，这里会按 `config.toml` 惰性加载。
pub fn get_config() -> Arc<StaticConfig> {
    slot(DEFAULT_CONFIG_PATH).load_full()
}

/// 只读取，不触发加载；错误处理这类可能在初始化前运行的路径使用
pub fn try_get_config() -> Option<Arc<StaticConfig>> {
    CONFIG.get().map(|c| c.load_full())
}

/// 以 `config.toml` 初始化，测试里常用
pub fn init_config() {
    init_config_from(DEFAULT_CONFIG_PATH);
}

/// 以指定文件初始化；已初始化时不做任何事
pub fn init_config_from(path: &str) {
    slot(path);
}
