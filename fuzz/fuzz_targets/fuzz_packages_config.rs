#![no_main]

use dotnet_deptree::ExtractOptions;
use dotnet_deptree::parsers::ManifestParser;
use dotnet_deptree::parsers::packages_config::PackagesConfigParser;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        let parser = PackagesConfigParser::new();

        let without_dev = parser.parse(content, &ExtractOptions::new(false));
        let with_dev = parser.parse(content, &ExtractOptions::new(true));

        if let (Ok(without_dev), Ok(with_dev)) = (without_dev, with_dev) {
            assert_eq!(without_dev.has_dev_dependencies, with_dev.has_dev_dependencies);
            assert!(without_dev.dependencies.values().all(|node| !node.is_dev()));
        }
    }
});
