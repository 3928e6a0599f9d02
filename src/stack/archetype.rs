crate::define_id_enum! {
    /// Runtime family an application is classified into
    Archetype {
        Python => "python" : "Python",
        JavaMaven => "java-maven" : "Java (Maven)" | "java" | "maven",
        NodeJs => "nodejs" : "Node.js" | "node",
        React => "react" : "React",
        Unknown => "unknown" : "Unknown",
    }
}

impl Archetype {
    /// Node.js runtime and `package.json` driven
    pub fn is_node_family(self) -> bool {
        matches!(self, Archetype::NodeJs | Archetype::React)
    }
}
