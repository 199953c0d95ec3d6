//! Static allow-list of platform modules.
//!
//! Membership is an exact, case-sensitive string test. Submodule imports are only system when the
//! dotted name itself is listed.

const SYSTEM_MODULES: &[&str] = &[
    // Language and runtime
    "Swift",
    "Darwin",
    "Darwin.C",
    "Darwin.POSIX",
    "Glibc",
    "Dispatch",
    "ObjectiveC",
    "Foundation",
    "FoundationNetworking",
    "CoreFoundation",
    "os",
    "os.log",
    "os.signpost",
    "Observation",
    "RegexBuilder",
    "Synchronization",
    "XCTest",
    "Testing",
    // UI
    "UIKit",
    "AppKit",
    "SwiftUI",
    "WatchKit",
    "WidgetKit",
    "ActivityKit",
    "TVUIKit",
    "Cocoa",
    "QuartzCore",
    "CoreAnimation",
    "CoreGraphics",
    "CoreImage",
    "CoreText",
    "PDFKit",
    "PencilKit",
    "QuickLook",
    "QuickLookThumbnailing",
    "LinkPresentation",
    "SafariServices",
    "WebKit",
    "MessageUI",
    "Charts",
    "TipKit",
    // Data and system services
    "Combine",
    "CoreData",
    "SwiftData",
    "CloudKit",
    "CoreServices",
    "CoreSpotlight",
    "MobileCoreServices",
    "UniformTypeIdentifiers",
    "Security",
    "LocalAuthentication",
    "AuthenticationServices",
    "CryptoKit",
    "CommonCrypto",
    "Network",
    "SystemConfiguration",
    "BackgroundTasks",
    "UserNotifications",
    "UserNotificationsUI",
    "StoreKit",
    "PassKit",
    "Contacts",
    "ContactsUI",
    "EventKit",
    "EventKitUI",
    "Photos",
    "PhotosUI",
    "AppIntents",
    "Intents",
    "IntentsUI",
    "OSLog",
    "Accessibility",
    "GameKit",
    "AdSupport",
    "AppTrackingTransparency",
    "DeviceCheck",
    "Social",
    "Accounts",
    "SharedWithYou",
    // Location and sensors
    "CoreLocation",
    "CoreLocation.CLLocation",
    "CoreLocationUI",
    "MapKit",
    "CoreMotion",
    "CoreBluetooth",
    "CoreNFC",
    "HealthKit",
    "HealthKitUI",
    "HomeKit",
    "ExternalAccessory",
    "NearbyInteraction",
    "CoreTelephony",
    "CoreHaptics",
    // Media and graphics
    "AVFoundation",
    "AVKit",
    "AVFAudio",
    "AudioToolbox",
    "CoreAudio",
    "CoreAudioKit",
    "CoreMedia",
    "CoreVideo",
    "CoreMIDI",
    "MediaPlayer",
    "MediaToolbox",
    "ImageIO",
    "VideoToolbox",
    "Vision",
    "VisionKit",
    "Speech",
    "SoundAnalysis",
    "Metal",
    "MetalKit",
    "MetalPerformanceShaders",
    "SceneKit",
    "SpriteKit",
    "GameplayKit",
    "GameController",
    "ARKit",
    "RealityKit",
    "ModelIO",
    "GLKit",
    "OpenGLES",
    // Machine learning
    "CoreML",
    "CreateML",
    "NaturalLanguage",
    "Accelerate",
    "simd",
];

/// True if `module` is a known platform module.
#[must_use]
pub fn is_system_module(module: &str) -> bool {
    SYSTEM_MODULES.contains(&module)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_common_frameworks() {
        for m in ["UIKit", "Foundation", "SwiftUI", "Combine", "CoreLocation.CLLocation", "os.log"] {
            assert!(is_system_module(m), "{m} should be system");
        }
    }

    #[test]
    fn classification_is_exact_and_case_sensitive() {
        assert!(!is_system_module("uikit"));
        assert!(!is_system_module("UIKitExtensions"));
        assert!(!is_system_module("Foundation.Date"));
        assert!(!is_system_module("Networking"));
        assert!(!is_system_module(""));
    }
}
