use reach::axl::xml;
use roxmltree::Document;
use speculate2::speculate;

speculate! {
    describe "children" {
        it "yields a singleton for a bare single item" {
            let doc = Document::parse(
                "<return><remoteDestination><destination>1</destination></remoteDestination></return>",
            ).unwrap();
            let ret = xml::descendant(&doc, "return").unwrap();
            assert_eq!(xml::children(ret, "remoteDestination").len(), 1);
        }

        it "yields every item for a repeated collection" {
            let doc = Document::parse(
                "<return><phone/><phone/><phone/></return>",
            ).unwrap();
            let ret = xml::descendant(&doc, "return").unwrap();
            assert_eq!(xml::children(ret, "phone").len(), 3);
        }

        it "yields an empty sequence when nothing matches" {
            let doc = Document::parse("<return><other/></return>").unwrap();
            let ret = xml::descendant(&doc, "return").unwrap();
            assert!(xml::children(ret, "phone").is_empty());
        }

        it "ignores namespace prefixes" {
            let doc = Document::parse(
                "<ns:return xmlns:ns=\"urn:x\"><ns:phone/><ns:phone/></ns:return>",
            ).unwrap();
            let ret = xml::descendant(&doc, "return").unwrap();
            assert_eq!(xml::children(ret, "phone").len(), 2);
        }
    }

    describe "text" {
        it "is none for an absent node" {
            assert_eq!(xml::text(None), None);
        }

        it "returns trimmed text content" {
            let doc = Document::parse("<userid>  jdoe  </userid>").unwrap();
            let node = xml::descendant(&doc, "userid");
            assert_eq!(xml::text(node), Some("jdoe".to_string()));
        }

        it "returns an empty string for an empty element" {
            let doc = Document::parse("<description/>").unwrap();
            let node = xml::descendant(&doc, "description");
            assert_eq!(xml::text(node), Some(String::new()));
        }

        it "flattens child structure instead of panicking" {
            let doc = Document::parse(
                "<primaryExtension><pattern>2463</pattern><routePartitionName>P</routePartitionName></primaryExtension>",
            ).unwrap();
            let node = xml::descendant(&doc, "primaryExtension");
            assert_eq!(
                xml::text(node),
                Some("<pattern>2463</pattern><routePartitionName>P</routePartitionName>".to_string()),
            );
        }
    }

    describe "scalar_or_nested" {
        it "passes a plain string through" {
            let doc = Document::parse("<callingSearchSpaceName>Internal_CSS</callingSearchSpaceName>").unwrap();
            let node = xml::descendant(&doc, "callingSearchSpaceName");
            assert_eq!(xml::scalar_or_nested(node), Some("Internal_CSS".to_string()));
        }

        it "unwraps a value nested one element deeper" {
            let doc = Document::parse(
                "<callingSearchSpaceName><value>Internal_CSS</value></callingSearchSpaceName>",
            ).unwrap();
            let node = xml::descendant(&doc, "callingSearchSpaceName");
            assert_eq!(xml::scalar_or_nested(node), Some("Internal_CSS".to_string()));
        }

        it "is none for an absent node" {
            assert_eq!(xml::scalar_or_nested(None), None);
        }
    }

    describe "flag" {
        it "accepts the server's boolean spellings" {
            assert_eq!(xml::flag(Some("true".into())), Some(true));
            assert_eq!(xml::flag(Some("t".into())), Some(true));
            assert_eq!(xml::flag(Some("1".into())), Some(true));
            assert_eq!(xml::flag(Some("false".into())), Some(false));
            assert_eq!(xml::flag(Some("f".into())), Some(false));
            assert_eq!(xml::flag(Some("0".into())), Some(false));
        }

        it "is none for anything else" {
            assert_eq!(xml::flag(None), None);
            assert_eq!(xml::flag(Some("yes".into())), None);
        }
    }

    describe "fault_of" {
        it "extracts code, message and vendor detail" {
            let doc = Document::parse(
                "<soapenv:Envelope xmlns:soapenv=\"http://schemas.xmlsoap.org/soap/envelope/\"><soapenv:Body>\
                 <soapenv:Fault><faultcode>soapenv:Client</faultcode>\
                 <faultstring>Operation failed</faultstring>\
                 <detail><axlError><axlcode>4052</axlcode>\
                 <axlmessage>Duplicate value in a UNIQUE INDEX column</axlmessage></axlError></detail>\
                 </soapenv:Fault></soapenv:Body></soapenv:Envelope>",
            ).unwrap();
            let fault = xml::fault_of(&doc).expect("fault should be detected");
            assert_eq!(fault.code, "soapenv:Client");
            assert_eq!(fault.message, "Operation failed");
            assert_eq!(
                fault.detail,
                Some("Duplicate value in a UNIQUE INDEX column".to_string()),
            );
        }

        it "falls back to plain detail text without a vendor element" {
            let doc = Document::parse(
                "<Envelope><Body><Fault><faultcode>c</faultcode>\
                 <faultstring>m</faultstring><detail>raw detail</detail></Fault></Body></Envelope>",
            ).unwrap();
            let fault = xml::fault_of(&doc).unwrap();
            assert_eq!(fault.detail, Some("raw detail".to_string()));
        }

        it "leaves detail empty when the fault carries none" {
            let doc = Document::parse(
                "<Envelope><Body><Fault><faultcode>c</faultcode>\
                 <faultstring>m</faultstring></Fault></Body></Envelope>",
            ).unwrap();
            let fault = xml::fault_of(&doc).unwrap();
            assert_eq!(fault.detail, None);
        }

        it "is none for a fault-free response" {
            let doc = Document::parse(
                "<Envelope><Body><getUserResponse><return/></getUserResponse></Body></Envelope>",
            ).unwrap();
            assert!(xml::fault_of(&doc).is_none());
        }
    }

    describe "escape" {
        it "escapes markup characters" {
            assert_eq!(
                xml::escape("a&b <c> \"d\" 'e'"),
                "a&amp;b &lt;c&gt; &quot;d&quot; &apos;e&apos;",
            );
        }

        it "leaves ordinary text alone" {
            assert_eq!(xml::escape("RDP_Teams_jdoe"), "RDP_Teams_jdoe");
        }
    }

    describe "push_tag" {
        it "appends an escaped element" {
            let mut body = String::new();
            xml::push_tag(&mut body, "description", "a<b");
            assert_eq!(body, "<description>a&lt;b</description>");
        }
    }
}
