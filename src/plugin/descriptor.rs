/// Audio ports exposed to the host, by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Port {
    Input = 0,
    /// Never written with signal; some hosts refuse plugins without an output.
    Output = 1,
}

impl Port {
    pub const ALL: [Port; 2] = [Port::Input, Port::Output];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortDirection {
    Input,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortDescriptor {
    pub port: Port,
    pub name: &'static str,
    pub direction: PortDirection,
    pub audio: bool,
}

/// Static plugin metadata handed to hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginDescriptor {
    pub unique_id: u64,
    pub label: &'static str,
    pub name: &'static str,
    pub maker: &'static str,
    pub copyright: &'static str,
    pub hard_rt_capable: bool,
    pub ports: [PortDescriptor; 2],
}

impl PluginDescriptor {
    pub fn port(&self, port: Port) -> &PortDescriptor {
        &self.ports[port.index()]
    }
}

pub const DESCRIPTOR: PluginDescriptor = PluginDescriptor {
    unique_id: 123,
    label: "fft_vis",
    name: "FFT visualizer",
    maker: "fftvis contributors",
    copyright: "None",
    hard_rt_capable: true,
    ports: [
        PortDescriptor {
            port: Port::Input,
            name: "Input",
            direction: PortDirection::Input,
            audio: true,
        },
        PortDescriptor {
            port: Port::Output,
            name: "Output",
            direction: PortDirection::Output,
            audio: true,
        },
    ],
};

/// Host-facing lookup; this library carries a single plugin.
pub fn descriptor(index: usize) -> Option<&'static PluginDescriptor> {
    match index {
        0 => Some(&DESCRIPTOR),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_plugin_at_index_zero() {
        assert_eq!(descriptor(0).map(|d| d.label), Some("fft_vis"));
        assert!(descriptor(1).is_none());
    }

    #[test]
    fn ports_are_named_by_role() {
        let d = descriptor(0).unwrap();
        assert_eq!(d.port(Port::Input).name, "Input");
        assert_eq!(d.port(Port::Input).direction, PortDirection::Input);
        assert_eq!(d.port(Port::Output).name, "Output");
        assert_eq!(d.port(Port::Output).direction, PortDirection::Output);
        for port in Port::ALL {
            assert_eq!(d.port(port).port, port);
            assert_eq!(Port::from_index(port.index()), Some(port));
        }
        assert_eq!(Port::from_index(2), None);
    }
}
