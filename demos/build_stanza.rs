//! Build and serialize an XMPP-style stanza
//!
//! This example builds a message stanza with namespace declarations,
//! resolves names through ancestor scope, and prints both the wire form and
//! the interchange projection.

use stanzakit::{Element, StanzaResult};

fn main() -> StanzaResult<()> {
    // A stream element declaring the default and the stream namespaces.
    let stream = Element::new("stream:stream");
    stream.set_attribute("xmlns", Some("jabber:client"));
    stream.set_attribute("xmlns:stream", Some("http://etherx.jabber.org/streams"));

    // A chat message inside the stream scope.
    let message = Element::new("message");
    message.set_attribute("to", Some("romeo@example.net"));
    message.set_attribute("type", Some("chat"));
    stream.append_child(message.clone());

    let body = Element::new("body");
    body.append_text("Wherefore art thou, Romeo?");
    message.append_child(body);

    // Namespace scope is inherited from the stream element.
    println!("message namespace: {}", message.namespace());
    println!("stream local name: {}", stream.local_name());

    // Register a namespace lazily and materialize it only when needed.
    message.add_optional_namespace("u", "urn:xmpp:delay");
    let prefix = message.use_namespace("delay", "urn:xmpp:delay");
    println!("declared with prefix: {prefix}");

    // Wire form and interchange projection.
    println!("wire: {}", message.serialize());
    println!("interchange: {}", serde_json::to_string_pretty(&message.to_value())?);

    // The interchange value rebuilds an equivalent live tree.
    let rebuilt = Element::from_value(&message.to_value())?;
    assert_eq!(rebuilt.serialize(), message.serialize());

    Ok(())
}
