//! Text host: the collaborator that owns the real text field.

/// Side effects the engine dispatches to the host text field.
///
/// All operations are treated as infallible.
pub trait TextHost {
    /// Append `text` to the output
    fn commit_text(&mut self, text: &str);
    /// Native enter action, used when nothing is being composed
    fn handle_enter(&mut self);
    /// Native delete action, used when nothing is being composed
    fn handle_delete(&mut self);
}

/// Stand-in host for when no text field is attached; every call is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHost;

impl TextHost for NoopHost {
    fn commit_text(&mut self, _text: &str) {}
    fn handle_enter(&mut self) {}
    fn handle_delete(&mut self) {}
}

/// Host that accumulates output into a string.
#[derive(Debug, Clone, Default)]
pub struct BufferHost {
    text: String,
}

impl BufferHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Take the accumulated text, leaving the buffer empty
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.text)
    }
}

impl TextHost for BufferHost {
    fn commit_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    fn handle_enter(&mut self) {
        self.text.push('\n');
    }

    fn handle_delete(&mut self) {
        self.text.pop();
    }
}

impl<T: TextHost + ?Sized> TextHost for Box<T> {
    fn commit_text(&mut self, text: &str) {
        (**self).commit_text(text)
    }

    fn handle_enter(&mut self) {
        (**self).handle_enter()
    }

    fn handle_delete(&mut self) {
        (**self).handle_delete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_host() {
        let mut host = BufferHost::new();
        host.commit_text("你好");
        host.handle_enter();
        host.commit_text("ab");
        host.handle_delete();
        assert_eq!(host.text(), "你好\na");
        assert_eq!(host.take(), "你好\na");
        assert_eq!(host.text(), "");
    }

    #[test]
    fn test_buffer_host_delete_on_empty() {
        let mut host = BufferHost::new();
        host.handle_delete();
        assert_eq!(host.text(), "");
    }

    #[test]
    fn test_boxed_host() {
        let mut host: Box<dyn TextHost> = Box::new(NoopHost);
        host.commit_text("ignored");
        host.handle_enter();
        host.handle_delete();
    }
}
