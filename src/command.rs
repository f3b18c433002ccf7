//! Commands, command descriptors and typed requests.
//!
//! A [`Request<T>`] pairs a fully built [`Command`] with the decoder that
//! turns its reply into `T`. Façades and [`Batch`](crate::batch::Batch)
//! consume requests; request builders in each module produce them.

use std::fmt;

use itoa::Buffer;

use crate::args::{Arg, ArgList};
use crate::error::Result;
use crate::reply::Reply;

/// Whether a command mutates server state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

/// A module command ready for transmission.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    name: &'static str,
    access: Access,
    args: Vec<Arg>,
}

impl Command {
    pub fn new(name: &'static str, access: Access, args: ArgList) -> Self {
        Self {
            name,
            access,
            args: args.into_vec(),
        }
    }

    /// Command name; may hold two words (`"GRAPH.CONFIG SET"`).
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn access(&self) -> Access {
        self.access
    }

    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    /// The command name split into its wire words.
    pub fn name_parts(&self) -> impl Iterator<Item = &'static str> {
        self.name.split_ascii_whitespace()
    }

    /// Name words followed by the arguments, as text.
    pub fn to_strings(&self) -> Vec<String> {
        self.name_parts()
            .map(str::to_string)
            .chain(self.args.iter().map(|a| a.to_text().into_owned()))
            .collect()
    }

    /// Encode into the RESP multibulk wire format:
    /// `*<N>\r\n$<len>\r\narg1\r\n$<len>\r\narg2\r\n…`
    ///
    /// Binary safe; provided for transports that want ready-made frames.
    pub fn encode_resp(&self) -> Vec<u8> {
        let parts: Vec<&[u8]> = self.name_parts().map(str::as_bytes).collect();
        let args: Vec<_> = self.args.iter().map(Arg::to_bytes).collect();
        let count = parts.len() + args.len();

        // '*' + digits + \r\n, then '$' + digits + \r\n + data + \r\n per arg
        let mut cap = 1 + 10 + 2;
        for p in parts.iter().copied().chain(args.iter().map(|a| a.as_ref())) {
            cap += 1 + 10 + 2 + p.len() + 2;
        }

        let mut buf = Vec::with_capacity(cap);
        let mut itoa_buf = Buffer::new();

        buf.push(b'*');
        buf.extend_from_slice(itoa_buf.format(count).as_bytes());
        buf.extend_from_slice(b"\r\n");

        for p in parts.iter().copied().chain(args.iter().map(|a| a.as_ref())) {
            buf.push(b'$');
            buf.extend_from_slice(itoa_buf.format(p.len()).as_bytes());
            buf.extend_from_slice(b"\r\n");
            buf.extend_from_slice(p);
            buf.extend_from_slice(b"\r\n");
        }

        buf
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)?;
        for arg in &self.args {
            write!(f, " {}", arg.to_text())?;
        }
        Ok(())
    }
}

/// Boxed reply decoder owned by a request.
pub type Decoder<T> = Box<dyn FnOnce(Reply) -> Result<T> + Send>;

/// A command together with the decoder for its reply.
pub struct Request<T> {
    command: Command,
    decoder: Decoder<T>,
}

impl<T: 'static> Request<T> {
    pub fn new<F>(name: &'static str, access: Access, args: ArgList, decode: F) -> Self
    where
        F: FnOnce(Reply) -> Result<T> + Send + 'static,
    {
        Self {
            command: Command::new(name, access, args),
            decoder: Box::new(decode),
        }
    }

    pub fn command(&self) -> &Command {
        &self.command
    }

    /// Decode a reply with this request's decoder.
    pub fn decode(self, reply: Reply) -> Result<T> {
        (self.decoder)(reply)
    }

    pub fn into_parts(self) -> (Command, Decoder<T>) {
        (self.command, self.decoder)
    }

    /// Post-process the decoded value.
    pub fn map<U: 'static, F>(self, f: F) -> Request<U>
    where
        F: FnOnce(T) -> U + Send + 'static,
    {
        let decoder = self.decoder;
        Request {
            command: self.command,
            decoder: Box::new(move |reply| decoder(reply).map(f)),
        }
    }
}

impl<T> fmt::Debug for Request<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("command", &self.command)
            .finish_non_exhaustive()
    }
}

/// Fixed command descriptor: name, access and decoder never vary per call.
#[derive(Debug)]
pub struct CommandSpec<T> {
    pub name: &'static str,
    pub access: Access,
    pub decode: fn(Reply) -> Result<T>,
}

impl<T> Clone for CommandSpec<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for CommandSpec<T> {}

impl<T: 'static> CommandSpec<T> {
    pub const fn read(name: &'static str, decode: fn(Reply) -> Result<T>) -> Self {
        Self {
            name,
            access: Access::Read,
            decode,
        }
    }

    pub const fn write(name: &'static str, decode: fn(Reply) -> Result<T>) -> Self {
        Self {
            name,
            access: Access::Write,
            decode,
        }
    }

    /// Bind arguments to this descriptor.
    pub fn request(self, args: ArgList) -> Request<T> {
        Request::new(self.name, self.access, args, self.decode)
    }
}

// ── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reply::decode;

    fn args(items: &[&str]) -> ArgList {
        let mut list = ArgList::new();
        list.args(items.iter().copied());
        list
    }

    #[test]
    fn encode_single_word_command() {
        let cmd = Command::new("BF.ADD", Access::Write, args(&["key", "item"]));
        assert_eq!(
            cmd.encode_resp(),
            b"*3\r\n$6\r\nBF.ADD\r\n$3\r\nkey\r\n$4\r\nitem\r\n"
        );
    }

    #[test]
    fn encode_two_word_command() {
        let cmd = Command::new("GRAPH.CONFIG GET", Access::Read, args(&["TIMEOUT"]));
        assert_eq!(
            cmd.encode_resp(),
            b"*3\r\n$12\r\nGRAPH.CONFIG\r\n$3\r\nGET\r\n$7\r\nTIMEOUT\r\n"
        );
        assert_eq!(cmd.to_strings(), vec!["GRAPH.CONFIG", "GET", "TIMEOUT"]);
    }

    #[test]
    fn encode_binary_and_numeric_args() {
        let mut list = ArgList::new();
        list.arg("t").arg(vec![0x00u8, 0x01, 0xFF]).arg(7i64).arg(0.5);
        let cmd = Command::new("AI.TENSORSET", Access::Write, list);
        let expected: &[u8] =
            b"*5\r\n$12\r\nAI.TENSORSET\r\n$1\r\nt\r\n$3\r\n\x00\x01\xFF\r\n$1\r\n7\r\n$3\r\n0.5\r\n";
        assert_eq!(cmd.encode_resp(), expected);
    }

    #[test]
    fn display_joins_args() {
        let cmd = Command::new("TS.GET", Access::Read, args(&["temp"]));
        assert_eq!(cmd.to_string(), "TS.GET temp");
    }

    #[test]
    fn spec_request_decodes() {
        const CARD: CommandSpec<i64> = CommandSpec::read("BF.CARD", decode::integer);
        let req = CARD.request(args(&["k"]));
        assert_eq!(req.command().access(), Access::Read);
        assert_eq!(req.decode(Reply::Integer(3)).unwrap(), 3);
    }

    #[test]
    fn request_map() {
        let req = Request::new("X", Access::Read, ArgList::new(), decode::integer).map(|n| n * 2);
        assert_eq!(req.decode(Reply::Integer(21)).unwrap(), 42);
    }
}
