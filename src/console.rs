use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout};

/// Граница ввода-вывода: меню общается с пользователем только через неё,
/// поэтому в тестах её можно подменить буферами в памяти.
#[allow(async_fn_in_trait)]
pub trait IoHandler {
    /// Следующая строка без `\n`/`\r\n`; `None` - ввод закончился.
    async fn read_line(&mut self) -> io::Result<Option<String>>;

    async fn write_line(&mut self, line: &str) -> io::Result<()>;

    /// Завершение работы: сбросить вывод, дальше строки не читаются.
    async fn terminate(&mut self) -> io::Result<()>;
}

pub struct Console<R, W> {
    reader: R,
    writer: W,
    terminated: bool,
}

impl Console<BufReader<Stdin>, Stdout> {
    pub fn stdio() -> Self {
        Console::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            terminated: false,
        }
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R, W> IoHandler for Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    async fn read_line(&mut self) -> io::Result<Option<String>> {
        if self.terminated {
            return Ok(None);
        }

        let mut line = String::new();
        if self.reader.read_line(&mut line).await? == 0 {
            return Ok(None);
        }

        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    async fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await
    }

    async fn terminate(&mut self) -> io::Result<()> {
        self.terminated = true;
        self.writer.flush().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_lines_until_eof() {
        let mut console = Console::new(&b"Inception 8 10\r\n\nlast"[..], Vec::new());

        assert_eq!(console.read_line().await.unwrap().as_deref(), Some("Inception 8 10"));
        assert_eq!(console.read_line().await.unwrap().as_deref(), Some(""));
        assert_eq!(console.read_line().await.unwrap().as_deref(), Some("last"));
        assert_eq!(console.read_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn writes_lines_and_stops_reading_after_terminate() {
        let mut console = Console::new(&b"1\n2\n"[..], Vec::new());
        console.write_line("hello").await.unwrap();
        console.terminate().await.unwrap();

        assert!(console.is_terminated());
        assert_eq!(console.read_line().await.unwrap(), None);
        assert_eq!(console.into_writer(), b"hello\n".to_vec());
    }
}
