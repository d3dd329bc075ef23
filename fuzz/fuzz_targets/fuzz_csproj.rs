#![no_main]

use dotnet_deptree::ExtractOptions;
use dotnet_deptree::parsers::ManifestParser;
use dotnet_deptree::parsers::csproj::CsprojParser;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        let parser = CsprojParser::new();

        match parser.parse(content, &ExtractOptions::new(true)) {
            Ok(tree) => {
                for (name, node) in &tree.dependencies {
                    assert_eq!(&node.name, name, "key must match node name");
                    assert!(
                        !tree.unknown_versions().contains(name),
                        "resolved dependency must not be listed as unknown"
                    );
                }
                if let Ok(manifest) = parser.decode(content) {
                    let frameworks = parser.target_frameworks(&manifest);
                    for (i, framework) in frameworks.iter().enumerate() {
                        assert!(
                            !frameworks[..i].contains(framework),
                            "frameworks must be de-duplicated"
                        );
                    }
                }
            }
            Err(e) => assert!(e.is_invalid_user_input(), "unexpected error kind: {e}"),
        }
    }
});
