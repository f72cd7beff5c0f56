
use crate::output::Output;
use indexmap::IndexMap;
use std::io;
use std::io::Write;
use std::sync::{Arc, Mutex};

/// An output kept in memory, so that tests can read back what was written to each location key.
#[derive(Clone, Debug, Default)]
pub(crate) struct MemoryOutput {
    files: Arc<Mutex<IndexMap<String, Vec<u8>>>>,
}

impl MemoryOutput {
    pub(crate) fn file_names(&self) -> Vec<String> {
        self.files.lock().unwrap().keys().cloned().collect()
    }

    pub(crate) fn contents(&self, file_name: &str) -> String {
        String::from_utf8(self.files.lock().unwrap()[file_name].clone()).unwrap()
    }
}

impl Output for MemoryOutput {
    fn writer_for_location_key(
        &self,
        location_key: &str,
        file_extension: &str,
    ) -> anyhow::Result<impl Write> {
        let file_name = format!("{location_key}.{file_extension}");
        self.files
            .lock()
            .unwrap()
            .insert(file_name.clone(), vec![]);

        Ok(MemoryWriter {
            file_name,
            files: self.files.clone(),
        })
    }
}

struct MemoryWriter {
    file_name: String,
    files: Arc<Mutex<IndexMap<String, Vec<u8>>>>,
}

impl Write for MemoryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.files
            .lock()
            .unwrap()
            .entry(self.file_name.clone())
            .or_default()
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
