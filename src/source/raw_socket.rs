use std::ffi::CString;
use std::io;
use std::mem;
use std::time::Duration;

use log::debug;

use super::{Acquire, FrameSource};
use crate::engine::context::SourceConfig;
use crate::engine::error::SourceError;

/// A Linux `AF_PACKET` socket delivering whole link-layer frames.
#[derive(Debug)]
pub struct RawSocket {
    fd: libc::c_int,
}

impl RawSocket {
    pub fn open(config: &SourceConfig) -> Result<Self, SourceError> {
        // htons: the kernel compares against the on-wire order
        let protocol = config.protocol.to_be();

        let fd = unsafe {
            libc::socket(
                libc::AF_PACKET,
                libc::SOCK_RAW | libc::SOCK_CLOEXEC,
                libc::c_int::from(protocol),
            )
        };
        if fd == -1 {
            return Err(SourceError::Unavailable(io::Error::last_os_error()));
        }

        // closes the fd on any early return below
        let socket = RawSocket { fd };

        if let Some(name) = config.interface.as_deref() {
            socket.bind(name, protocol)?;
        }
        if let Some(timeout) = config.read_timeout {
            socket.set_read_timeout(timeout)?;
        }

        debug!(
            "opened packet socket fd={} protocol=0x{:04x} interface={}",
            fd,
            config.protocol,
            config.interface.as_deref().unwrap_or("any")
        );
        Ok(socket)
    }

    fn bind(&self, ifname: &str, protocol: u16) -> Result<(), SourceError> {
        let c_name =
            CString::new(ifname).map_err(|_| SourceError::UnknownInterface(ifname.to_owned()))?;
        let ifindex = unsafe { libc::if_nametoindex(c_name.as_ptr()) };
        if ifindex == 0 {
            return Err(SourceError::UnknownInterface(ifname.to_owned()));
        }

        let mut sll: libc::sockaddr_ll = unsafe { mem::zeroed() };
        sll.sll_family = libc::AF_PACKET as libc::c_ushort;
        sll.sll_protocol = protocol;
        sll.sll_ifindex = ifindex as libc::c_int;

        let ret = unsafe {
            libc::bind(
                self.fd,
                &sll as *const libc::sockaddr_ll as *const libc::sockaddr,
                mem::size_of::<libc::sockaddr_ll>() as libc::socklen_t,
            )
        };
        if ret == -1 {
            return Err(SourceError::Unavailable(io::Error::last_os_error()));
        }
        Ok(())
    }

    fn set_read_timeout(&self, timeout: Duration) -> Result<(), SourceError> {
        let tv = libc::timeval {
            tv_sec: timeout.as_secs() as libc::time_t,
            tv_usec: timeout.subsec_micros() as libc::suseconds_t,
        };

        let ret = unsafe {
            libc::setsockopt(
                self.fd,
                libc::SOL_SOCKET,
                libc::SO_RCVTIMEO,
                &tv as *const libc::timeval as *const libc::c_void,
                mem::size_of::<libc::timeval>() as libc::socklen_t,
            )
        };
        if ret == -1 {
            return Err(SourceError::Unavailable(io::Error::last_os_error()));
        }
        Ok(())
    }
}

impl FrameSource for RawSocket {
    fn acquire(&mut self, buf: &mut [u8]) -> Result<Acquire, SourceError> {
        let len = unsafe {
            libc::recv(
                self.fd,
                buf.as_mut_ptr() as *mut libc::c_void,
                buf.len(),
                0,
            )
        };

        if len < 0 {
            return classify_recv_error(io::Error::last_os_error());
        }

        Ok(Acquire::Frame(len as usize))
    }
}

/// Maps a failed `recv` onto the loop's outcomes. A timed-out or interrupted
/// wait is not a failure; anything else ends the capture.
fn classify_recv_error(err: io::Error) -> Result<Acquire, SourceError> {
    match err.kind() {
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut | io::ErrorKind::Interrupted => {
            Ok(Acquire::Idle)
        }
        _ => Err(SourceError::Io(err)),
    }
}

impl Drop for RawSocket {
    fn drop(&mut self) {
        unsafe { libc::close(self.fd) };
    }
}
