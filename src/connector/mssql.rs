//! SQL Server 会话（tiberius）

use async_trait::async_trait;
use tiberius::{AuthMethod, Client, ColumnData, Config};
use tokio::net::TcpStream;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};

use crate::connector::{ConnectionTarget, DbSession};
use crate::core::{AdminError, AdminResult, Rows};

pub struct MsSqlSession {
    client: Client<Compat<TcpStream>>,
}

impl MsSqlSession {
    pub async fn connect(target: &ConnectionTarget) -> AdminResult<Self> {
        let mut config = Config::new();
        config.host(&target.host);
        config.port(target.port);
        if !target.database.is_empty() {
            config.database(&target.database);
        }
        config.authentication(AuthMethod::sql_server(&target.user, &target.password));
        config.trust_cert();

        let tcp = TcpStream::connect(config.get_addr())
            .await
            .map_err(|e| AdminError::Connection(e.to_string()))?;
        tcp.set_nodelay(true)
            .map_err(|e| AdminError::Connection(e.to_string()))?;

        let client = Client::connect(config, tcp.compat_write())
            .await
            .map_err(|e| AdminError::Connection(e.to_string()))?;
        Ok(Self { client })
    }
}

fn render_cell(index: usize, data: &ColumnData<'_>) -> AdminResult<String> {
    let text = match data {
        ColumnData::String(value) => value.as_deref().unwrap_or_default().to_string(),
        ColumnData::Bit(value) => match value {
            Some(true) => "True".to_string(),
            Some(false) => "False".to_string(),
            None => String::new(),
        },
        ColumnData::U8(value) => value.map(|v| v.to_string()).unwrap_or_default(),
        ColumnData::I16(value) => value.map(|v| v.to_string()).unwrap_or_default(),
        ColumnData::I32(value) => value.map(|v| v.to_string()).unwrap_or_default(),
        ColumnData::I64(value) => value.map(|v| v.to_string()).unwrap_or_default(),
        ColumnData::Guid(value) => value.map(|v| v.to_string()).unwrap_or_default(),
        _ => {
            return Err(AdminError::Interpretation(format!(
                "第 {} 列类型无法渲染为文本",
                index
            )))
        }
    };
    Ok(text)
}

#[async_trait]
impl DbSession for MsSqlSession {
    async fn fetch_rows(&mut self, sql: &str) -> AdminResult<Rows> {
        let rows = self
            .client
            .simple_query(sql)
            .await
            .map_err(|e| AdminError::Query(e.to_string()))?
            .into_first_result()
            .await
            .map_err(|e| AdminError::Query(e.to_string()))?;

        rows.iter()
            .map(|row| {
                row.cells()
                    .enumerate()
                    .map(|(i, (_, data))| render_cell(i, data))
                    .collect()
            })
            .collect()
    }

    async fn execute(&mut self, sql: &str) -> AdminResult<()> {
        self.client
            .execute(sql, &[])
            .await
            .map_err(|e| AdminError::Query(e.to_string()))?;
        Ok(())
    }

    async fn close(self: Box<Self>) -> AdminResult<()> {
        self.client
            .close()
            .await
            .map_err(|e| AdminError::Connection(e.to_string()))
    }
}
