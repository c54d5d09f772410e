//! serve サブコマンド
//!
//! ギャラリーサーバーを起動します。
//! 省略した引数は環境変数（`GALLERY_*`、次に旧名）から補います。

use clap::Args;

use crate::config::{get_database_url, get_host, get_port};

/// serve サブコマンドの引数
#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Listen port [env: GALLERY_PORT, PORT] [default: 5000]
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Bind address [env: GALLERY_HOST, HOST] [default: 0.0.0.0]
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Database URL [env: GALLERY_DATABASE_URL, DATABASE_URL] [default: sqlite://gallery.db]
    #[arg(long)]
    pub database_url: Option<String>,
}

impl ServeArgs {
    /// 実際に使うポート
    pub fn port(&self) -> u16 {
        self.port.unwrap_or_else(get_port)
    }

    /// 実際に使うバインドアドレス
    pub fn host(&self) -> String {
        self.host.clone().unwrap_or_else(get_host)
    }

    /// 実際に使うデータベースURL
    pub fn database_url(&self) -> String {
        self.database_url.clone().unwrap_or_else(get_database_url)
    }
}
